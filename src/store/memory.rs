use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::{ItemStore, PARTITION_KEY};
use crate::error::Error;
use crate::items::{Cursor, Item, ScanPage};

/// In-process [`ItemStore`] for tests and local runs
///
/// Scans return items ordered by id. Every delete call is recorded so callers
/// can assert how many store deletes an operation issued, and the store can
/// be switched into a failing mode to exercise storage error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, Item>>,
    deletes: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `items`
    ///
    /// Items without a string `id` are skipped.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items
            .into_iter()
            .filter_map(|item| {
                let id = item.get(PARTITION_KEY)?.as_str()?.to_string();
                Some((id, item))
            })
            .collect();

        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    /// Whether the store holds no items
    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    /// Ids passed to [`ItemStore::delete_item`], in call order
    pub async fn deleted_ids(&self) -> Vec<String> {
        self.deletes.lock().await.clone()
    }

    fn check_available(&self) -> Result<(), Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Unavailable("memory store is failing".to_string()));
        }
        Ok(())
    }
}

impl ItemStore for MemoryStore {
    async fn get_item(&self, id: &str) -> Result<Option<Item>, Error> {
        self.check_available()?;
        Ok(self.items.lock().await.get(id).cloned())
    }

    async fn put_item(&self, item: &Item) -> Result<(), Error> {
        self.check_available()?;

        let id = item
            .get(PARTITION_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::TypeMismatch("Item ID must be a string".to_string()))?;

        let _ = self.items.lock().await.insert(id.to_string(), item.clone());
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), Error> {
        self.check_available()?;

        self.deletes.lock().await.push(id.to_string());
        let _ = self.items.lock().await.remove(id);
        Ok(())
    }

    async fn scan_items(
        &self,
        limit: i32,
        exclusive_start_key: Option<&Cursor>,
    ) -> Result<ScanPage, Error> {
        self.check_available()?;

        let limit = usize::try_from(limit).unwrap_or(0);
        let start = match exclusive_start_key.and_then(|key| key.get(PARTITION_KEY)) {
            Some(Value::String(id)) => Bound::Excluded(id.as_str()),
            Some(_) => return Err(Error::TypeMismatch("Cursor id must be a string".to_string())),
            None => Bound::Unbounded,
        };

        let items = self.items.lock().await;
        let mut remaining = items.range::<str, _>((start, Bound::Unbounded));

        let page: Vec<Item> = remaining
            .by_ref()
            .take(limit)
            .map(|(_, item)| item.clone())
            .collect();

        let last_evaluated_key = match (remaining.next(), page.last()) {
            (Some(_), Some(last)) => last.get(PARTITION_KEY).map(|id| {
                let mut cursor = Cursor::new();
                let _ = cursor.insert(PARTITION_KEY.to_string(), id.clone());
                cursor
            }),
            _ => None,
        };

        Ok(ScanPage {
            items: page,
            last_evaluated_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str) -> Item {
        match json!({"id": id, "name": id, "description": ""}) {
            Value::Object(item) => item,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new();
        store.put_item(&item("a")).await.unwrap();

        assert_eq!(store.get_item("a").await.unwrap(), Some(item("a")));
        assert_eq!(store.get_item("b").await.unwrap(), None);

        store.delete_item("a").await.unwrap();
        store.delete_item("a").await.unwrap();
        assert!(store.is_empty().await);
        assert_eq!(store.deleted_ids().await, vec!["a", "a"]);
    }

    #[tokio::test]
    async fn test_scan_pages_in_id_order() {
        let store = MemoryStore::with_items(["c", "a", "b"].map(item));

        let first = store.scan_items(2, None).await.unwrap();
        assert_eq!(first.items, vec![item("a"), item("b")]);
        let cursor = first.last_evaluated_key.expect("more items remain");

        let second = store.scan_items(2, Some(&cursor)).await.unwrap();
        assert_eq!(second.items, vec![item("c")]);
        assert!(second.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_exact_page_has_no_cursor() {
        let store = MemoryStore::with_items(["a", "b"].map(item));
        let page = store.scan_items(2, None).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = MemoryStore::with_items([item("a")]);
        store.set_failing(true);

        assert!(store.get_item("a").await.unwrap_err().is_storage_error());
        assert!(store.put_item(&item("b")).await.is_err());
        assert!(store.delete_item("a").await.is_err());
        assert!(store.deleted_ids().await.is_empty());

        store.set_failing(false);
        assert_eq!(store.len().await, 1);
    }
}
