pub mod chat;
pub mod conversations;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/chat", chat::router())
        .nest("/conversations", conversations::router())
}

/// Body of every failed `/chat` response.
#[derive(Debug, Serialize)]
pub struct ErrorReply {
    pub reply: &'static str,
}

pub(crate) fn error_reply(reply: &'static str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorReply { reply })).into_response()
}
