mod dto;
pub mod handlers;
pub(crate) mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo_types::User;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::profile_routes())
        .merge(handlers::bio_routes())
}
