mod dynamo;
mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

use std::future::Future;

use crate::error::Error;
use crate::items::{Cursor, Item, ScanPage};

/// Name of the single key attribute of the items table
pub const PARTITION_KEY: &str = "id";

/// Key-value store holding items under their `id`
///
/// Implementations must be safe for concurrent use by overlapping invocations.
/// Every call is a single store round trip; retries and timeouts belong to the
/// store client.
pub trait ItemStore: Send + Sync {
    /// Point read by id, `None` when absent
    fn get_item(&self, id: &str) -> impl Future<Output = Result<Option<Item>, Error>> + Send;

    /// Write the whole item, replacing any item with the same id
    fn put_item(&self, item: &Item) -> impl Future<Output = Result<(), Error>> + Send;

    /// Delete by id; deleting a missing id is a no-op
    fn delete_item(&self, id: &str) -> impl Future<Output = Result<(), Error>> + Send;

    /// Scan at most `limit` items, resuming after `exclusive_start_key`
    fn scan_items(
        &self,
        limit: i32,
        exclusive_start_key: Option<&Cursor>,
    ) -> impl Future<Output = Result<ScanPage, Error>> + Send;
}
