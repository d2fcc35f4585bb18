use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::scan::ScanOutput;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnConsumedCapacity, ReturnValue, Select};
use serde_dynamo::{from_item, from_items, to_item};
use std::collections::HashMap;

use super::{ItemStore, PARTITION_KEY};
use crate::error::Error;
use crate::items::{Cursor, Item, ScanPage};

/// [`ItemStore`] backed by a DynamoDB table keyed on `id`
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Create a store over `table_name` using `client`
    ///
    /// The SDK client is reference counted, so cloning it shares the
    /// underlying connection pool with the global client.
    pub fn new(client: &Client, table_name: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            table_name: table_name.into(),
        }
    }

    /// Name of the backing table
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(id: &str) -> (&'static str, AttributeValue) {
        (PARTITION_KEY, AttributeValue::S(id.to_string()))
    }
}

impl ItemStore for DynamoStore {
    async fn get_item(&self, id: &str) -> Result<Option<Item>, Error> {
        let (key_name, key_value) = Self::key(id);

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_return_consumed_capacity(None)
            .key(key_name, key_value)
            .send()
            .await?;

        if let Some(item) = result.item {
            let item: Item = from_item(item)?;

            Ok(Some(item))
        } else {
            Ok(None)
        }
    }

    async fn put_item(&self, item: &Item) -> Result<(), Error> {
        let item: HashMap<String, AttributeValue> = to_item(item)?;

        let _ = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .return_values(ReturnValue::None)
            .return_consumed_capacity(ReturnConsumedCapacity::None)
            .set_item(Some(item))
            .send()
            .await?;

        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), Error> {
        let (key_name, key_value) = Self::key(id);

        let _ = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_return_consumed_capacity(None)
            .key(key_name, key_value)
            .send()
            .await?;

        Ok(())
    }

    async fn scan_items(
        &self,
        limit: i32,
        exclusive_start_key: Option<&Cursor>,
    ) -> Result<ScanPage, Error> {
        let exclusive_start_key: Option<HashMap<String, AttributeValue>> =
            exclusive_start_key.map(|key| to_item(key)).transpose()?;

        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .select(Select::AllAttributes)
            .set_return_consumed_capacity(None)
            .limit(limit)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await?;

        ScanPage::try_from(output)
    }
}

impl TryFrom<ScanOutput> for ScanPage {
    type Error = Error;

    fn try_from(output: ScanOutput) -> Result<Self, Self::Error> {
        let items: Vec<Item> = match output.items {
            Some(items) => from_items(items)?,
            None => Vec::new(),
        };

        let last_evaluated_key = match output.last_evaluated_key {
            Some(key) if !key.is_empty() => {
                let key: Cursor = from_item(key)?;
                Some(key)
            }
            _ => None,
        };

        Ok(Self {
            items,
            last_evaluated_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_output_conversion() {
        let mut raw = HashMap::new();
        let _ = raw.insert("id".to_string(), AttributeValue::S("a".to_string()));
        let _ = raw.insert("name".to_string(), AttributeValue::S("pen".to_string()));
        let _ = raw.insert("description".to_string(), AttributeValue::S(String::new()));
        let _ = raw.insert("stock".to_string(), AttributeValue::N("3".to_string()));

        let mut last_key = HashMap::new();
        let _ = last_key.insert("id".to_string(), AttributeValue::S("a".to_string()));

        let output = ScanOutput::builder()
            .items(raw)
            .set_last_evaluated_key(Some(last_key))
            .build();

        let page = ScanPage::try_from(output).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["name"], json!("pen"));
        assert_eq!(page.items[0]["description"], json!(""));
        assert_eq!(page.items[0]["stock"], json!(3));
        assert_eq!(
            page.last_evaluated_key.map(serde_json::Value::Object),
            Some(json!({"id": "a"}))
        );
    }

    #[test]
    fn test_scan_output_last_page() {
        let page = ScanPage::try_from(ScanOutput::builder().build()).unwrap();
        assert!(page.items.is_empty());
        assert!(page.last_evaluated_key.is_none());
    }
}
