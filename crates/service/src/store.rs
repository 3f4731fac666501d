//! In-memory item catalog shared with route modules through the options value.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Longest accepted item name, in characters.
pub const MAX_NAME_LEN: usize = 200;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name must be at most {MAX_NAME_LEN} characters")]
    NameTooLong,

    #[error("invalid item id: {0}")]
    InvalidId(String),
}

/// Identifier of an item (UUIDv7, time-ordered).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s)
            .map(Self)
            .map_err(|e| ItemError::InvalidId(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Arc<RwLock<BTreeMap<ItemId, Item>>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, name: &str) -> Result<Item, ItemError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ItemError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ItemError::NameTooLong);
        }

        let item = Item {
            id: ItemId::new(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    pub async fn get(&self, id: &ItemId) -> Option<Item> {
        self.items.read().await.get(id).cloned()
    }

    /// All items, ordered by id.
    pub async fn list(&self) -> Vec<Item> {
        self.items.read().await.values().cloned().collect()
    }

    pub async fn remove(&self, id: &ItemId) -> Option<Item> {
        self.items.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}
