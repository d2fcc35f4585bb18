use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::create_table::{CreateTableError, CreateTableOutput};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
};
use tracing::info;

use crate::error::Error;
use crate::store::PARTITION_KEY;

/// Create the items table: string hash key `id`, no sort key
///
/// An existing table with the same name is not an error.
pub async fn items_table(client: &Client, table_name: &str) -> Result<CreateTableOutput, Error> {
    let builder = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(PARTITION_KEY)
                .key_type(KeyType::Hash)
                .build()?,
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(PARTITION_KEY)
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build()?,
        );

    match builder.send().await {
        Ok(output) => {
            info!(table = table_name, "created items table");
            Ok(output)
        }
        Err(e) => {
            if let Some(CreateTableError::ResourceInUseException(_)) = e.as_service_error() {
                return Ok(CreateTableOutput::builder().build());
            }
            Err(e.into())
        }
    }
}
