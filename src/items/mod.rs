mod operations;
mod types;
mod validation;

pub use operations::*;
pub use types::{Cursor, DEFAULT_LIST_LIMIT, Item, ItemPage, ScanPage};
pub use validation::{REQUIRED_FIELDS, validate_item};
