//! # DynamoDB Items Handler
//!
//! A CRUD request handler for a single DynamoDB table of "items", invoked per
//! request by AWS Lambda behind API Gateway.
//!
//! ## Features
//!
//! - **Five operations**: create, get, list (paginated), update (full replace), delete
//! - **Validation first**: every operation checks its input before touching the store
//! - **Single status mapping**: the dispatcher is the one place failures become status codes
//! - **Pluggable store**: [`store::DynamoStore`] in production, [`store::MemoryStore`] for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dynamo_items::{Request, Settings, handle, store::DynamoStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dynamo_items::Error> {
//!     let settings = Settings::from_env()?;
//!     let store = DynamoStore::new(dynamo_items::init(&settings).await, &settings.table_name);
//!
//!     let response = handle(
//!         &store,
//!         Request::new("POST", None, Some(r#"{"name":"pen","description":"blue"}"#)),
//!     )
//!     .await;
//!     assert_eq!(response.status_code, 201);
//!     Ok(())
//! }
//! ```
#![deny(
    bad_style,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    unused,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_mut
)]

mod error;
pub use error::Error;

/// Environment-derived settings
pub mod config;

/// Item types, validation and operations
pub mod items;

/// Storage collaborators
pub mod store;

/// Request dispatcher
pub mod handler;

/// AWS Lambda HTTP adapter
pub mod lambda;

/// Table setup utilities for local and integration environments
pub mod setup;

pub use config::Settings;
pub use handler::{Request, Response, handle};
pub use items::{Cursor, Item, ItemPage};
pub use store::ItemStore;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use tokio::sync::OnceCell;

/// Global DynamoDB client instance, shared by every invocation of the process
static GLOBAL_CLIENT: OnceCell<DynamoDbClient> = OnceCell::const_new();

/// Build the AWS config used by the global client
///
/// It configures:
/// - Adaptive retry mode with 3 max attempts
/// - Exponential backoff starting at 1 second
/// - Connect timeout: 3 seconds
/// - Read timeout: 20 seconds
/// - Operation timeout: 60 seconds
/// - The region and optional endpoint override from [`Settings`]
async fn aws_config_defaults(region: String, endpoint_url: Option<&str>) -> SdkConfig {
    use aws_types::sdk_config::{RetryConfig, TimeoutConfig};
    use std::time::Duration;

    let timeout_config = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(3))
        .read_timeout(Duration::from_secs(20))
        .operation_timeout(Duration::from_secs(60))
        .build();

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .retry_config(
            RetryConfig::adaptive()
                .with_max_attempts(3)
                .with_initial_backoff(Duration::from_secs(1)),
        )
        .timeout_config(timeout_config);

    if let Some(endpoint_url) = endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }

    loader.load().await
}

/// Initialize the global DynamoDB client from [`Settings`]
///
/// Only the first call configures the client; later calls return the
/// existing instance.
pub async fn init(settings: &Settings) -> &'static DynamoDbClient {
    GLOBAL_CLIENT
        .get_or_init(|| async {
            let config =
                aws_config_defaults(settings.region.clone(), settings.endpoint_url.as_deref())
                    .await;
            DynamoDbClient::new(&config)
        })
        .await
}

/// Initialize the global DynamoDB client with a custom client instance
pub async fn init_with_client(client: DynamoDbClient) -> &'static DynamoDbClient {
    GLOBAL_CLIENT.get_or_init(|| async { client }).await
}

/// Get a reference to the global DynamoDB client
///
/// Auto-initializes with the region from `AWS_REGION` (default
/// `ap-northeast-1`) and the LocalStack endpoint when `AWS_PROFILE=localstack`.
pub async fn dynamodb_client() -> &'static DynamoDbClient {
    GLOBAL_CLIENT
        .get_or_init(|| async {
            let endpoint_url = match std::env::var("AWS_PROFILE").as_deref() {
                Ok("localstack") => Some(config::LOCALSTACK_ENDPOINT),
                _ => None,
            };
            let config = aws_config_defaults(Settings::region_from_env(), endpoint_url).await;
            DynamoDbClient::new(&config)
        })
        .await
}
