//! Process-lifetime `id -> name` map shared by every request.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use shopfront_core::AppError;

use super::model::Item;

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl ItemStore {
    /// Inserts the item, replacing any existing name under the same id.
    #[instrument(skip(self, name))]
    pub async fn upsert(&self, id: String, name: String) -> Item {
        let mut items = self.items.write().await;
        let replaced = items.insert(id.clone(), name.clone()).is_some();
        debug!(replaced, "Item stored");
        Item { id, name }
    }

    pub async fn get(&self, id: &str) -> Result<Item, AppError> {
        self.items
            .read()
            .await
            .get(id)
            .map(|name| Item {
                id: id.to_string(),
                name: name.clone(),
            })
            .ok_or_else(|| AppError::not_found("Item not found"))
    }

    #[instrument(skip(self, name))]
    pub async fn update(&self, id: &str, name: String) -> Result<Item, AppError> {
        let mut items = self.items.write().await;
        let slot = items
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Item not found"))?;
        *slot = name.clone();
        Ok(Item {
            id: id.to_string(),
            name,
        })
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        self.items
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Item not found"))
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}
