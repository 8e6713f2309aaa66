mod dto;
pub mod handlers;
pub(crate) mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo_types::Message;

pub fn router() -> Router<AppState> {
    handlers::message_routes()
}
