use serde::{Deserialize, Serialize};

use crate::models::Photo;

// -- Users --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// -- Posts --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub user_id: i64,
    pub price: f64,
    pub quantity: i64,
    pub unit: String,
    pub product: String,
    pub category: String,
    pub zip: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub id: i64,
    pub photo: Photo,
}

/// Category and owner are fixed once a post exists.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    pub price: f64,
    pub quantity: i64,
    pub unit: String,
    pub product: String,
    pub zip: String,
    #[serde(default)]
    pub description: String,
}

// -- Photos --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetPhotoRequest {
    pub file_path: String,
}

// -- Mutations --

/// Row count reported by a mutating call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowsAffected {
    pub rows: usize,
}
