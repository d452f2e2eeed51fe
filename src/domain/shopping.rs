use super::clock::Clock;
use super::enums::Signal;
use crate::error::StorageError;
use crate::feedback::FeedbackSink;
use crate::persistence::{load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::rc::Rc;
use uuid::Uuid;

/// Store key for the shopping list
pub const SHOPPING_LIST_KEY: &str = "shopping-list";

/// A single shopping list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredShoppingItem")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    /// Epoch milliseconds, present iff the item is completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at_timestamp: Option<i64>,
}

/// On-disk item as older builds may have written it. Both spellings of the
/// completion field are accepted; the canonical one wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredShoppingItem {
    id: String,
    name: String,
    #[serde(default)]
    completed_at_timestamp: Option<i64>,
    #[serde(default, rename = "completedAtTimeStamp")]
    legacy_completed_at: Option<i64>,
}

impl From<StoredShoppingItem> for ShoppingItem {
    fn from(stored: StoredShoppingItem) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            completed_at_timestamp: stored.completed_at_timestamp.or(stored.legacy_completed_at),
        }
    }
}

impl ShoppingItem {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            completed_at_timestamp: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at_timestamp.is_some()
    }
}

/// Incomplete items first (relative order kept), then completed items by
/// completion time ascending.
fn completion_order(a: &ShoppingItem, b: &ShoppingItem) -> Ordering {
    match (a.completed_at_timestamp, b.completed_at_timestamp) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

/// In-memory shopping list, persisted after every mutation.
///
/// A failed write is returned to the caller but the mutation stays applied.
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
    feedback: Rc<dyn FeedbackSink>,
}

impl ShoppingList {
    /// Read the persisted list, empty when absent. Does not write.
    pub fn load(
        store: Rc<dyn KeyValueStore>,
        clock: Rc<dyn Clock>,
        feedback: Rc<dyn FeedbackSink>,
    ) -> Self {
        let items: Vec<ShoppingItem> =
            load_json(store.as_ref(), SHOPPING_LIST_KEY).unwrap_or_default();
        tracing::info!(count = items.len(), "loaded shopping list");

        Self {
            items,
            store,
            clock,
            feedback,
        }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Prepend a new item. Returns false without writing when `name` is blank.
    pub fn add(&mut self, name: &str) -> Result<bool, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        let item = ShoppingItem::new(name.to_string());
        tracing::debug!(id = %item.id, name, "add item");
        self.items.insert(0, item);
        self.persist()?;
        Ok(true)
    }

    /// Flip completion of `id` and re-sort. Unknown ids are a no-op.
    pub fn toggle_complete(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };

        let signal = match item.completed_at_timestamp.take() {
            Some(_) => Signal::Impact,
            None => {
                item.completed_at_timestamp = Some(self.clock.now_ms());
                Signal::Success
            }
        };
        tracing::debug!(id, completed = item.is_completed(), "toggle item");
        self.feedback.emit(signal);

        self.items.sort_by(completion_order);
        self.persist()?;
        Ok(true)
    }

    /// Remove `id` after the user confirmed. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<bool, StorageError> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        let removed = self.items.remove(index);
        tracing::debug!(id, name = %removed.name, "delete item");
        self.feedback.emit(Signal::Impact);
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), StorageError> {
        save_json(self.store.as_ref(), SHOPPING_LIST_KEY, &self.items)
    }
}
