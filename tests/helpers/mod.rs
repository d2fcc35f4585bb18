/// Test helpers and fixtures for dispatcher and storage integration tests
///
/// Dispatcher tests run against the in-process `MemoryStore`. DynamoDB tests
/// use the global client, which targets LocalStack when `AWS_PROFILE=localstack`.
pub mod fixtures;

pub use dynamo_items::store::{DynamoStore, MemoryStore};
pub use dynamo_items::{ItemStore, Request, Response, handle, setup};
pub use serde_json::{Value, json};

#[allow(unused_imports)]
pub use fixtures::{item_body, stored_item};

use tokio::sync::OnceCell;

/// Table used by the LocalStack tests
#[allow(dead_code)]
pub const TEST_TABLE: &str = "tests-items";

/// Ensure the LocalStack table exists once per test binary
static TEST_TABLE_INIT: OnceCell<()> = OnceCell::const_new();

/// DynamoDB store over [`TEST_TABLE`], creating the table if needed
#[allow(dead_code)]
pub async fn dynamo_store() -> DynamoStore {
    let client = dynamo_items::dynamodb_client().await;

    TEST_TABLE_INIT
        .get_or_init(|| async {
            let _ = setup::items_table(client, TEST_TABLE).await;
        })
        .await;

    DynamoStore::new(client, TEST_TABLE)
}

/// Send a request and return the status with the decoded JSON body
#[allow(dead_code)]
pub async fn send<S: ItemStore>(
    store: &S,
    method: &str,
    id: Option<&str>,
    body: Option<&str>,
) -> (u16, Option<Value>) {
    let response: Response = handle(store, Request::new(method, id, body)).await;
    (response.status_code, response.json_body())
}

/// Wait for eventual consistency
///
/// DynamoDB scans may not immediately reflect recent writes.
#[allow(dead_code)]
pub async fn wait_for_consistency() {
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
}
