//! `GET /metrics`: collect every signal once and encode the snapshot.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::exposition::{self, Format};
use crate::state::AppState;

pub async fn metrics(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let format = Format::negotiate(headers.get(ACCEPT).and_then(|v| v.to_str().ok()));

    let snapshot = match state.registry.collect() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Collection failed");
            return failure(format!("collection failed: {e}\n"));
        }
    };

    match exposition::render(&snapshot, format) {
        Ok(body) => ([(CONTENT_TYPE, format.content_type())], body).into_response(),
        Err(e) => {
            error!(error = %e, "Encoding metrics failed");
            failure(format!("encoding failed: {e}\n"))
        }
    }
}

fn failure(message: String) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
