use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use smartrelay_schema::ConversationLog;
use smartrelay_transcript::ConversationStats;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationList {
    pub total_conversations: usize,
    pub conversations: Vec<ConversationLog>,
}

type QueryError = (StatusCode, Json<serde_json::Value>);

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_conversations))
        .route("/stats", get(conversation_stats))
}

fn store_error(err: anyhow::Error) -> QueryError {
    tracing::error!("failed to load transcript store: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
}

async fn list_conversations(
    State(state): State<AppState>,
) -> Result<Json<ConversationList>, QueryError> {
    let store = state.transcripts.load().await.map_err(store_error)?;
    Ok(Json(ConversationList {
        total_conversations: store.conversations.len(),
        conversations: store.conversations,
    }))
}

async fn conversation_stats(
    State(state): State<AppState>,
) -> Result<Json<ConversationStats>, QueryError> {
    let store = state.transcripts.load().await.map_err(store_error)?;
    Ok(Json(ConversationStats::compute(&store.conversations)))
}
