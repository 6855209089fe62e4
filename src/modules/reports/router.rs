use axum::{Router, routing::get};

use super::controller::{sales_report, summary_report};
use crate::state::AppState;

pub fn init_reports_router() -> Router<AppState> {
    Router::new()
        .route("/sales", get(sales_report))
        .route("/summary", get(summary_report))
}
