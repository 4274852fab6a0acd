//! GitHub webhook endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
};
use hookcord_core::{dispatch, InboundRequest};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Receive one GitHub delivery.
/// POST / and POST /webhook
pub async fn receive_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let mut request = InboundRequest::new(method.as_str(), body.to_vec());
    for (name, value) in headers.iter() {
        // Non-UTF-8 values cannot be any header the relay reads.
        if let Ok(value) = value.to_str() {
            request.insert_header(name.as_str(), value);
        }
    }

    let outcome = dispatch(&request, &state.config, state.delivery.as_ref()).await?;

    StatusCode::from_u16(outcome.status_code()).map_err(|e| ApiError::internal(e.to_string()))
}
