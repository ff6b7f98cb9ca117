use serde::{Deserialize, Serialize};

/// Read-only profile context. Nothing in the task core mutates a user; it is
/// created once at registration and only looked up afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub profile_image_url: Option<String>,
    pub created_at: String,
}
