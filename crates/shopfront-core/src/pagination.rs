//! Pagination for list endpoints.
//!
//! List endpoints accept `limit` plus either `page` (1-indexed) or `offset`.
//! When `page` is present it wins over `offset`.
//!
//! ```ignore
//! // GET /api/products?limit=20&page=3
//! let params = PaginationParams { limit: Some(20), offset: None, page: Some(3) };
//! assert_eq!(params.offset(), 40);
//!
//! let meta = PaginationMeta::new(total, &params);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Query strings may carry `limit=` with no value; treat that as absent.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata attached to every paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of matching rows
    pub total: i64,
    /// Limit that was applied
    pub limit: i64,
    /// Rows skipped
    pub offset: i64,
    /// Page number, when page-based pagination was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        Self {
            total,
            limit,
            offset,
            page: params.page(),
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// `limit` / `offset` / `page` query parameters.
///
/// - `limit` is clamped to `[1, MAX_LIMIT]`, default `DEFAULT_LIMIT`
/// - `offset` is clamped to a minimum of 0
/// - `page` is clamped to a minimum of 1
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.page() {
            Some(page) => (page - 1).saturating_mul(self.limit()),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams {
            limit,
            offset,
            page,
        }
    }

    #[test]
    fn test_defaults() {
        let p = PaginationParams::default();
        assert_eq!(p.limit(), DEFAULT_LIMIT);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), None);
    }

    #[test]
    fn test_limit_is_clamped() {
        for (input, expected) in [(Some(0), 1), (Some(-3), 1), (Some(50), 50), (Some(500), 100)] {
            assert_eq!(params(input, None, None).limit(), expected);
        }
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let p = params(Some(20), Some(5), Some(3));
        assert_eq!(p.offset(), 40);
        assert_eq!(p.page(), Some(3));
    }

    #[test]
    fn test_page_below_one_is_first_page() {
        let p = params(Some(10), None, Some(0));
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), Some(1));
    }

    #[test]
    fn test_negative_offset_is_zero() {
        assert_eq!(params(None, Some(-8), None).offset(), 0);
    }

    #[test]
    fn test_meta_has_more() {
        let p = params(Some(10), Some(0), None);
        assert!(PaginationMeta::new(11, &p).has_more);
        assert!(!PaginationMeta::new(10, &p).has_more);

        let p = params(Some(10), None, Some(2));
        let meta = PaginationMeta::new(25, &p);
        assert_eq!(meta.offset, 10);
        assert_eq!(meta.page, Some(2));
        assert!(meta.has_more);
    }

    #[test]
    fn test_huge_page_and_offset_saturate() {
        let p = params(Some(100), None, Some(i64::MAX));
        assert_eq!(p.offset(), i64::MAX);
        assert!(!PaginationMeta::new(10, &p).has_more);

        let p = params(Some(100), Some(i64::MAX), None);
        assert_eq!(p.offset(), i64::MAX);
        let meta = PaginationMeta::new(i64::MAX, &p);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_omits_page_when_offset_based() {
        let meta = PaginationMeta::new(3, &params(Some(10), Some(0), None));
        let json = serde_json::to_string(&meta).unwrap();
        assert!(!json.contains("page"));
        assert!(json.contains(r#""total":3"#));
    }

    #[test]
    fn test_deserialize_string_numbers_and_blanks() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"limit":"25","offset":"","page":" 2 "}"#).unwrap();
        assert_eq!(p.limit, Some(25));
        assert_eq!(p.offset, None);
        assert_eq!(p.page, Some(2));
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let result: Result<PaginationParams, _> = serde_json::from_str(r#"{"limit":"ten"}"#);
        assert!(result.is_err());
    }
}
