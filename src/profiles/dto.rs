use serde::{Deserialize, Serialize};

use super::repo_types::User;

/// Context for the `profile` template.
#[derive(Debug, Serialize)]
pub struct ProfileContext {
    pub id: String,
    pub data: ProfileData,
}

#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub friends: i32,
    pub posts: Vec<String>,
}

impl ProfileContext {
    pub fn new(user: User, posts: Vec<String>) -> Self {
        Self {
            id: user.username,
            data: ProfileData {
                name: user.display_name,
                bio: user.bio,
                avatar: user.avatar_url,
                friends: user.friends_count,
                posts,
            },
        }
    }
}

/// Context for the `edit` template.
#[derive(Debug, Serialize)]
pub struct EditContext {
    pub id: String,
    #[serde(rename = "currentBio")]
    pub current_bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
}

/// Body of `POST /update-bio`.
#[derive(Debug, Deserialize)]
pub struct UpdateBioForm {
    #[serde(rename = "myID")]
    pub my_id: Option<String>,
    #[serde(rename = "newBio")]
    pub new_bio: Option<String>,
}
