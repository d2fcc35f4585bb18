use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::Error;
use crate::items::types::{Cursor, Item, ItemPage};
use crate::items::validation::validate_item;
use crate::store::{ItemStore, PARTITION_KEY};

/// Message of the [`Error::InvalidInput`] returned by [`create_item`]
pub const INVALID_CREATE_MESSAGE: &str = "Invalid item data. Required fields: name, description";

/// Message of the [`Error::InvalidInput`] returned by [`update_item`]
pub const INVALID_UPDATE_MESSAGE: &str = "Invalid item data";

/// Check that `body` is a mapping carrying the required fields and unwrap it
fn checked_body(body: Value, not_mapping: &str, invalid: &str) -> Result<Item, Error> {
    if !body.is_object() {
        return Err(Error::TypeMismatch(not_mapping.to_string()));
    }

    if !validate_item(&body)? {
        return Err(Error::InvalidInput(invalid.to_string()));
    }

    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(Error::TypeMismatch(not_mapping.to_string())),
    }
}

fn expect_id(id: &Value) -> Result<&str, Error> {
    id.as_str()
        .ok_or_else(|| Error::TypeMismatch("Item ID must be a string".to_string()))
}

/// Build the stored record: `body` with `id` set, replacing any `id` it carried
fn with_id(id: &str, mut body: Item) -> Item {
    let _ = body.insert(PARTITION_KEY.to_string(), Value::String(id.to_string()));
    body
}

/// Create a new item with a freshly generated id
///
/// # Errors
///
/// - [`Error::TypeMismatch`] if `body` is not a JSON object
/// - [`Error::InvalidInput`] if `name` or `description` is missing
/// - [`Error::StorageFailure`] wrapping the cause if the write fails; no retry
pub async fn create_item<S: ItemStore>(store: &S, body: Value) -> Result<Item, Error> {
    let body = checked_body(body, "Item data must be a mapping", INVALID_CREATE_MESSAGE)?;

    let id = Uuid::new_v4().to_string();
    let item = with_id(&id, body);

    store
        .put_item(&item)
        .await
        .map_err(|e| Error::storage(format!("Failed to create item: {e}"), e))?;

    debug!(id = %id, "item created");
    Ok(item)
}

/// Get an item by id
///
/// Returns `Ok(None)` when no item has this id. Fails with
/// [`Error::TypeMismatch`] before any store access if `id` is not a string.
pub async fn get_item<S: ItemStore>(store: &S, id: &Value) -> Result<Option<Item>, Error> {
    let id = expect_id(id)?;
    store.get_item(id).await
}

/// List one page of items
///
/// `limit` must be a JSON integer ([`Error::TypeMismatch`] otherwise) greater
/// than zero ([`Error::InvalidInput`] otherwise). Pass the previous page's
/// `last_evaluated_key` as `cursor` to continue. Items come back in store
/// order; store errors are returned unchanged.
pub async fn list_items<S: ItemStore>(
    store: &S,
    limit: &Value,
    cursor: Option<&Cursor>,
) -> Result<ItemPage, Error> {
    let limit = match limit {
        Value::Number(n) if n.is_i64() || n.is_u64() => n.as_i64().unwrap_or(i64::MAX),
        _ => return Err(Error::TypeMismatch("limit must be an integer".to_string())),
    };

    if limit <= 0 {
        return Err(Error::InvalidInput("limit must be greater than 0".to_string()));
    }

    // DynamoDB caps Limit at i32
    let limit = i32::try_from(limit).unwrap_or(i32::MAX);

    let page = store.scan_items(limit, cursor).await?;
    Ok(page.into())
}

/// Replace the item stored under `id` with `body`
///
/// This is a full overwrite: fields of the previous record that are absent
/// from `body` are dropped. No existence check is made, so updating an
/// unknown id creates it.
///
/// # Errors
///
/// - [`Error::TypeMismatch`] if `id` is not a string or `body` is not a JSON object
/// - [`Error::InvalidInput`] if `name` or `description` is missing
/// - store errors unchanged
pub async fn update_item<S: ItemStore>(store: &S, id: &Value, body: Value) -> Result<Item, Error> {
    let id = expect_id(id)?;
    let body = checked_body(body, "Body must be a mapping", INVALID_UPDATE_MESSAGE)?;

    let item = with_id(id, body);
    store.put_item(&item).await?;

    debug!(id = %id, "item replaced");
    Ok(item)
}

/// Delete the item stored under `id`
///
/// The existence check and the delete are two separate store calls; a
/// concurrent delete of the same id between them is tolerated since the
/// store delete is a no-op for missing keys.
///
/// # Errors
///
/// - [`Error::TypeMismatch`] if `id` is not a string
/// - [`Error::InvalidInput`] if `id` is empty
/// - [`Error::NotFound`] if no item has this id
/// - store errors unchanged
pub async fn delete_item<S: ItemStore>(store: &S, id: &Value) -> Result<(), Error> {
    let id = expect_id(id)?;

    if id.is_empty() {
        return Err(Error::InvalidInput(
            "Item ID is required (non-empty).".to_string(),
        ));
    }

    if store.get_item(id).await?.is_none() {
        return Err(Error::NotFound(format!("Item with id {id} not found")));
    }

    store.delete_item(id).await?;

    debug!(id = %id, "item deleted");
    Ok(())
}
