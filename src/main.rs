use dynamo_items::Settings;
use dynamo_items::lambda::function_handler;
use dynamo_items::store::DynamoStore;
use lambda_http::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let settings = Settings::from_env()?;
    let client = dynamo_items::init(&settings).await;
    let store = DynamoStore::new(client, &settings.table_name);

    tracing::info!(table = %store.table_name(), region = %settings.region, "starting items handler");

    run(service_fn(|event| function_handler(&store, event))).await
}
