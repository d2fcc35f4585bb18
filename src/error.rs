use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_runtime_api::http::Response;
use serde_dynamo::Error as SerdeDynamoError;
use serde_json::Error as JsonError;
use std::error::Error as StdError;
use std::fmt;

type DynamoPutError = SdkError<PutItemError, Response>;
type DynamoGetError = SdkError<GetItemError, Response>;
type DynamoScanError = SdkError<ScanError, Response>;
type DynamoDeleteItemError = SdkError<DeleteItemError, Response>;
type DynamoCreateTableError = SdkError<CreateTableError, Response>;

/// Item handler error
#[derive(Debug)]
pub enum Error {
    /// A value of the wrong shape was passed to an operation
    /// (non-object body, non-string id, non-integer limit)
    TypeMismatch(String),
    /// Well-typed but semantically invalid input
    InvalidInput(String),
    /// The referenced item does not exist
    NotFound(String),
    /// Store failure wrapped with a contextual message
    StorageFailure {
        /// Contextual message, e.g. `Failed to create item: ...`
        message: String,
        /// The underlying store error
        source: Box<Error>,
    },
    /// Request body is not valid JSON
    Json(JsonError),
    /// Missing or invalid configuration
    Config(String),
    /// The store could not be reached
    Unavailable(String),
    /// Serde DynamoDB serialization/deserialization error
    SerdeDynamo(SerdeDynamoError),
    /// DynamoDB request builder error
    BuildError(BuildError),
    /// DynamoDB PutItem operation error
    DynamoPutError(DynamoPutError),
    /// DynamoDB GetItem operation error
    DynamoGetError(DynamoGetError),
    /// DynamoDB Scan operation error
    DynamoScanError(DynamoScanError),
    /// DynamoDB DeleteItem operation error
    DynamoDeleteItemError(DynamoDeleteItemError),
    /// DynamoDB CreateTable operation error
    DynamoCreateTableError(DynamoCreateTableError),
}

impl Error {
    /// Wrap a store error with a contextual message, keeping the cause
    pub fn storage(message: impl Into<String>, source: Error) -> Self {
        Error::StorageFailure {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Check if the error is a type mismatch raised before any store access
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch(_))
    }

    /// Check if the error is an input validation failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Check if the error reports a missing item
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if the error is a JSON decode failure
    pub fn is_json_error(&self) -> bool {
        matches!(self, Error::Json(_))
    }

    /// Check if the error originates from the store
    ///
    /// Returns `true` for wrapped storage failures, DynamoDB operation errors
    /// and attribute (de)serialization errors.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Error::StorageFailure { .. }
                | Error::Unavailable(_)
                | Error::SerdeDynamo(_)
                | Error::BuildError(_)
                | Error::DynamoPutError(_)
                | Error::DynamoGetError(_)
                | Error::DynamoScanError(_)
                | Error::DynamoDeleteItemError(_)
                | Error::DynamoCreateTableError(_)
        )
    }
}

macro_rules! impl_from_error {
    ($name:ident, $variant:ident) => {
        impl From<$name> for Error {
            fn from(e: $name) -> Self {
                Error::$variant(e)
            }
        }
    };
    ($name:ident) => {
        impl From<$name> for Error {
            fn from(e: $name) -> Self {
                Error::$name(e)
            }
        }
    };
}

impl_from_error!(SerdeDynamoError, SerdeDynamo);
impl_from_error!(JsonError, Json);
impl_from_error!(BuildError);
impl_from_error!(DynamoPutError);
impl_from_error!(DynamoGetError);
impl_from_error!(DynamoScanError);
impl_from_error!(DynamoDeleteItemError);
impl_from_error!(DynamoCreateTableError);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch(message)
            | Error::InvalidInput(message)
            | Error::NotFound(message) => f.write_str(message),
            Error::StorageFailure { message, .. } => f.write_str(message),
            Error::Json(e) => write!(f, "Invalid JSON: {}", e),
            Error::Config(message) => write!(f, "Configuration error: {}", message),
            Error::Unavailable(message) => write!(f, "Store unavailable: {}", message),
            Error::SerdeDynamo(e) => write!(f, "DynamoDB serialization error: {}", e),
            Error::BuildError(e) => write!(f, "DynamoDB request builder error: {}", e),
            Error::DynamoPutError(e) => {
                write!(f, "DynamoDB PutItem operation failed: {}", e)
            }
            Error::DynamoGetError(e) => {
                write!(f, "DynamoDB GetItem operation failed: {}", e)
            }
            Error::DynamoScanError(e) => {
                write!(f, "DynamoDB Scan operation failed: {}", e)
            }
            Error::DynamoDeleteItemError(e) => {
                write!(f, "DynamoDB DeleteItem operation failed: {}", e)
            }
            Error::DynamoCreateTableError(e) => {
                write!(f, "DynamoDB CreateTable operation failed: {}", e)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::StorageFailure { source, .. } => Some(source.as_ref()),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}
