use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::{Body, Request as HttpRequest, RequestExt, Response as HttpResponse};
use std::collections::HashMap;

use crate::handler::{self, Request, Response};
use crate::store::ItemStore;

/// Convert an API Gateway request into a dispatcher [`Request`]
///
/// Only the `id` path parameter is kept. An empty body becomes `None`;
/// binary bodies are decoded as UTF-8, replacing invalid sequences.
pub fn to_request(event: &HttpRequest) -> Request {
    let path_parameters = event
        .path_parameters()
        .first("id")
        .map(|id| HashMap::from([("id".to_string(), id.to_string())]));

    let body = match event.body() {
        Body::Empty => None,
        Body::Text(text) => Some(text.clone()),
        Body::Binary(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
    };

    Request {
        http_method: event.method().as_str().to_string(),
        path_parameters,
        body,
    }
}

/// Convert a dispatcher [`Response`] into an HTTP response
pub fn into_http_response(
    response: Response,
) -> Result<HttpResponse<Body>, lambda_http::http::Error> {
    let builder = HttpResponse::builder().status(response.status_code);

    match response.body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::Text(body)),
        None => builder.body(Body::Empty),
    }
}

/// Lambda entry point for one invocation
pub async fn function_handler<S: ItemStore>(
    store: &S,
    event: HttpRequest,
) -> Result<HttpResponse<Body>, lambda_http::Error> {
    let response = handler::handle(store, to_request(&event)).await;
    Ok(into_http_response(response)?)
}
