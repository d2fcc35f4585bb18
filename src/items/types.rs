use serde::Serialize;
use serde_json::{Map, Value};

/// An item record: `id`, `name`, `description` plus any extra fields, passed through verbatim
pub type Item = Map<String, Value>;

/// Opaque pagination cursor (the store's last evaluated key)
pub type Cursor = Map<String, Value>;

/// Page size used when listing without an explicit limit
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// One page of a store scan
#[must_use = "scan results should be used or you'll lose the fetched data"]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanPage {
    /// Items in store-defined order
    pub items: Vec<Item>,
    /// Cursor to resume from, `None` on the last page
    pub last_evaluated_key: Option<Cursor>,
}

/// Result of the list operation, serialized as the list response body
///
/// `last_evaluated_key` is always present in the JSON, `null` on the last page.
#[must_use = "list results should be used or you'll lose the fetched data"]
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ItemPage {
    /// The items of this page
    pub items: Vec<Item>,
    /// Cursor for the next page
    pub last_evaluated_key: Option<Cursor>,
}

impl ItemPage {
    /// Whether more items exist beyond this page
    pub fn has_more(&self) -> bool {
        self.last_evaluated_key.is_some()
    }
}

impl From<ScanPage> for ItemPage {
    fn from(page: ScanPage) -> Self {
        Self {
            items: page.items,
            last_evaluated_key: page.last_evaluated_key,
        }
    }
}
