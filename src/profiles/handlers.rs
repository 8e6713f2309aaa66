use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use minijinja::HtmlEscape;
use tracing::{error, info, instrument, warn};

use super::dto::{EditContext, ProfileContext, SearchQuery, UpdateBioForm};
use crate::{
    error::StoreError,
    response::{found, profile_location},
    state::AppState,
    views::render_page,
};

const PROFILE_NOT_FOUND: &str = "<h1>404 - 查無此人</h1>";

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile/:username", get(show_profile))
        .route("/search", get(search))
}

pub fn bio_routes() -> Router<AppState> {
    Router::new()
        .route("/edit/:username", get(edit_bio))
        .route("/update-bio", post(update_bio))
}

/// GET /profile/:username
/// The post lookup needs the user's id, so the two queries run back to back.
#[instrument(skip(state))]
pub async fn show_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    let user = match state.store.find_user(&username).await {
        Ok(u) => u,
        Err(StoreError::NotFound) => {
            warn!(%username, "profile not found");
            return (StatusCode::NOT_FOUND, Html(PROFILE_NOT_FOUND)).into_response();
        }
        Err(e) => {
            error!(error = %e, %username, "user lookup failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "伺服器發生錯誤").into_response();
        }
    };

    let posts = match state.store.list_post_contents(user.user_id).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, user_id = user.user_id, "post lookup failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "讀取貼文失敗").into_response();
        }
    };

    render_page(state.views.as_ref(), "profile", &ProfileContext::new(user, posts)).into_response()
}

/// GET /search?keyword=
#[instrument(skip(state))]
pub async fn search(State(state): State<AppState>, Query(q): Query<SearchQuery>) -> Response {
    let Some(keyword) = q.keyword.filter(|k| !k.is_empty()) else {
        return found("/");
    };

    match state.store.find_username(&keyword).await {
        Ok(username) => found(&profile_location(&username)),
        Err(StoreError::NotFound) => Html(format!(
            "<h1>找不到使用者：{}</h1><br><a href=\"/\">回首頁</a>",
            HtmlEscape(&keyword)
        ))
        .into_response(),
        Err(e) => {
            error!(error = %e, %keyword, "search failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "搜尋錯誤").into_response()
        }
    }
}

/// GET /edit/:username
/// Unknown users and query failures get the same answer.
#[instrument(skip(state))]
pub async fn edit_bio(State(state): State<AppState>, Path(username): Path<String>) -> Response {
    match state.store.find_bio(&username).await {
        Ok(current_bio) => render_page(
            state.views.as_ref(),
            "edit",
            &EditContext {
                id: username,
                current_bio,
            },
        )
        .into_response(),
        Err(e) => {
            warn!(error = %e, %username, "bio not editable");
            "無法編輯".into_response()
        }
    }
}

/// POST /update-bio
#[instrument(skip(state, form))]
pub async fn update_bio(
    State(state): State<AppState>,
    Form(form): Form<UpdateBioForm>,
) -> Result<Response, (StatusCode, &'static str)> {
    let username = form.my_id.as_deref();
    let affected = state
        .store
        .update_bio(username, form.new_bio.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, ?username, "bio update failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "更新失敗")
        })?;

    info!(?username, affected, "bio updated");
    Ok(found(&profile_location(username.unwrap_or_default())))
}
