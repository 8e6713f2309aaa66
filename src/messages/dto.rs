use serde::{Deserialize, Serialize};

/// Body of `POST /add-message`. Fields are bound as-is, absent ones as NULL.
#[derive(Debug, Deserialize)]
pub struct AddMessageForm {
    pub username_field: Option<String>,
    pub content_field: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}
