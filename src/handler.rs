use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::items::{self, DEFAULT_LIST_LIMIT};
use crate::store::ItemStore;

/// Response message for a body that is not valid JSON
pub const INVALID_JSON: &str = "Invalid JSON";
/// Response message when get finds nothing
pub const ITEM_NOT_FOUND: &str = "Item not found";
/// Response message for PUT/DELETE without an id path parameter
pub const MISSING_ITEM_ID: &str = "Missing item ID";
/// Response message for unsupported methods
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
/// Response message for every unexpected failure
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Inbound request, shaped like an API Gateway proxy event
///
/// `httpMethod` is required when deserializing: an event without it is
/// rejected before dispatch instead of becoming a status code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// HTTP method, compared case-sensitively
    pub http_method: String,
    /// Route parameters; the item id lives under `id`
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    /// Raw request body
    #[serde(default)]
    pub body: Option<String>,
}

impl Request {
    /// Build a request from its method, optional `id` path parameter and optional body
    pub fn new(method: &str, id: Option<&str>, body: Option<&str>) -> Self {
        Self {
            http_method: method.to_string(),
            path_parameters: id.map(|id| HashMap::from([("id".to_string(), id.to_string())])),
            body: body.map(str::to_string),
        }
    }

    /// The `id` path parameter, if the route carried one
    pub fn path_id(&self) -> Option<&str> {
        self.path_parameters.as_ref()?.get("id").map(String::as_str)
    }

    /// Decode the body as JSON
    ///
    /// A missing body is a [`Error::TypeMismatch`]; malformed text is [`Error::Json`].
    fn json_body(&self) -> Result<Value, Error> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| Error::TypeMismatch("Request body must be a string".to_string()))?;

        Ok(serde_json::from_str(body)?)
    }
}

/// Outbound response, serialized as `{"statusCode": .., "body": ..}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code
    pub status_code: u16,
    /// JSON-encoded body, absent for 204
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Response {
    /// Response whose body is `payload` encoded as JSON
    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Result<Self, Error> {
        Ok(Self {
            status_code,
            body: Some(serde_json::to_string(payload)?),
        })
    }

    /// Response with a `{"message": ..}` body
    pub fn message(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: Some(json!({ "message": message }).to_string()),
        }
    }

    /// Response without a body
    pub fn empty(status_code: u16) -> Self {
        Self {
            status_code,
            body: None,
        }
    }

    /// Decode the body back into JSON, `None` when there is no body
    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Dispatch one request to the matching item operation
///
/// | Method | id     | Operation                            |
/// |--------|--------|--------------------------------------|
/// | POST   | any    | create, 201                          |
/// | GET    | yes    | get, 200 or 404                      |
/// | GET    | no     | list with default limit, 200         |
/// | PUT    | yes    | update, 200                          |
/// | DELETE | yes    | delete, 204                          |
/// | PUT/DELETE | no | 400 `Missing item ID`                |
/// | other  | -      | 405 `Method not allowed`             |
///
/// Failures are mapped once, here: JSON decode errors become 400
/// `Invalid JSON`, input and delete-not-found errors become 400 with their
/// own message, and everything else becomes 500 without leaking the cause.
#[tracing::instrument(
    name = "dispatch",
    skip_all,
    fields(method = %request.http_method, has_id = request.path_id().is_some())
)]
pub async fn handle<S: ItemStore>(store: &S, request: Request) -> Response {
    let response = match route(store, &request).await {
        Ok(response) => response,
        Err(e) if e.is_json_error() => Response::message(400, INVALID_JSON),
        Err(e) if e.is_invalid_input() || e.is_not_found() => {
            Response::message(400, &e.to_string())
        }
        Err(e) => {
            error!(error = %e, source = ?std::error::Error::source(&e), "request failed");
            Response::message(500, INTERNAL_SERVER_ERROR)
        }
    };

    if (400..500).contains(&response.status_code) {
        warn!(status = response.status_code, body = ?response.body, "request rejected");
    } else {
        info!(status = response.status_code, "request handled");
    }

    response
}

async fn route<S: ItemStore>(store: &S, request: &Request) -> Result<Response, Error> {
    let id = request.path_id();

    match (request.http_method.as_str(), id) {
        ("POST", _) => {
            let body = request.json_body()?;
            let item = items::create_item(store, body).await?;
            Response::json(201, &item)
        }
        ("GET", Some(id)) => match items::get_item(store, &Value::from(id)).await? {
            Some(item) => Response::json(200, &item),
            None => Ok(Response::message(404, ITEM_NOT_FOUND)),
        },
        ("GET", None) => {
            let page = items::list_items(store, &Value::from(DEFAULT_LIST_LIMIT), None).await?;
            Response::json(200, &page)
        }
        ("PUT" | "DELETE", None) => Ok(Response::message(400, MISSING_ITEM_ID)),
        ("PUT", Some(id)) => {
            let body = request.json_body()?;
            let item = items::update_item(store, &Value::from(id), body).await?;
            if item.is_empty() {
                return Ok(Response::message(404, ITEM_NOT_FOUND));
            }
            Response::json(200, &item)
        }
        ("DELETE", Some(id)) => {
            items::delete_item(store, &Value::from(id)).await?;
            Ok(Response::empty(204))
        }
        _ => Ok(Response::message(405, METHOD_NOT_ALLOWED)),
    }
}
