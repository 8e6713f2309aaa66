use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{error, info, instrument};

use super::dto::{AddMessageForm, ErrorBody};
use super::repo_types::Message;
use crate::{response::found, state::AppState};

const SERVER_ERROR: &str = "伺服器錯誤";

pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/api/messages", get(list_messages))
        .route("/add-message", post(add_message))
}

#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>, (StatusCode, Json<ErrorBody>)> {
    let messages = state.store.list_messages().await.map_err(|e| {
        error!(error = %e, "list messages failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: SERVER_ERROR,
            }),
        )
    })?;
    Ok(Json(messages))
}

#[instrument(skip(state, form))]
pub async fn add_message(
    State(state): State<AppState>,
    Form(form): Form<AddMessageForm>,
) -> Result<Response, (StatusCode, &'static str)> {
    state
        .store
        .insert_message(form.username_field.as_deref(), form.content_field.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "insert message failed");
            (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
        })?;

    info!(username = ?form.username_field, "message added");
    Ok(found("/"))
}
