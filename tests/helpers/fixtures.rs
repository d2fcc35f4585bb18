/// Common request bodies and stored records
use dynamo_items::Item;
use serde_json::{Value, json};

/// JSON text of a create/update body with the two required fields
#[allow(dead_code)]
pub fn item_body(name: &str, description: &str) -> String {
    json!({ "name": name, "description": description }).to_string()
}

/// A record as the store would hold it, with an optional `extra` field
#[allow(dead_code)]
pub fn stored_item(id: &str, name: &str, description: &str, extra: Option<Value>) -> Item {
    let mut item = Item::new();
    let _ = item.insert("id".to_string(), json!(id));
    let _ = item.insert("name".to_string(), json!(name));
    let _ = item.insert("description".to_string(), json!(description));
    if let Some(extra) = extra {
        let _ = item.insert("extra".to_string(), extra);
    }
    item
}
