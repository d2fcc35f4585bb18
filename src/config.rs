use crate::error::Error;

/// Region used when `AWS_REGION` is not set
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Endpoint used when running against LocalStack (`AWS_PROFILE=localstack`)
pub const LOCALSTACK_ENDPOINT: &str = "http://127.0.0.1:4566";

/// Suffix appended to the deployment identifier to form the table name
pub const TABLE_SUFFIX: &str = "-items";

/// Runtime settings derived from the Lambda environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// DynamoDB table holding the items
    pub table_name: String,
    /// AWS region of the table
    pub region: String,
    /// Endpoint override, set for LocalStack
    pub endpoint_url: Option<String>,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    ///
    /// `AWS_STACK_NAME` is required and yields the table name
    /// `{AWS_STACK_NAME}-items`. `AWS_REGION` falls back to [`DEFAULT_REGION`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stack_name = lookup("AWS_STACK_NAME")
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Config("AWS_STACK_NAME is not set".to_string()))?;

        let region = lookup("AWS_REGION")
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let endpoint_url = match lookup("AWS_PROFILE").as_deref() {
            Some("localstack") => Some(LOCALSTACK_ENDPOINT.to_string()),
            _ => None,
        };

        Ok(Self {
            table_name: format!("{stack_name}{TABLE_SUFFIX}"),
            region,
            endpoint_url,
        })
    }

    /// Region from the environment, without requiring a table name
    pub fn region_from_env() -> String {
        std::env::var("AWS_REGION")
            .ok()
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }
}
