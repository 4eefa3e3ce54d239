use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use smartrelay_core::GENERIC_FAILURE_REPLY;
use smartrelay_schema::{ChatTurn, Stage, UserInfo};

use super::error_reply;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub user_info: UserInfo,
    pub stage: Stage,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chat))
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("rejected chat request body: {rejection}");
            return error_reply(GENERIC_FAILURE_REPLY);
        }
    };

    match state.relay.handle(&request.message, &request.history).await {
        Ok(outcome) => {
            let stage = outcome.classification.reported_stage();
            Json(ChatResponse {
                reply: outcome.reply,
                user_info: outcome.classification.user_info,
                stage,
            })
            .into_response()
        }
        Err(err) => {
            tracing::warn!("chat request failed: {err}");
            error_reply(err.user_reply())
        }
    }
}
