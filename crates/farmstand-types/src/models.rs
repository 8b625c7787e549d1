use serde::{Deserialize, Serialize};

/// A user as shown to clients. The stored password never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub rating: f64,
    pub active: bool,
}

/// The seller attached to a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub rating: f64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub owner: Owner,
    pub price: f64,
    pub quantity: i64,
    pub unit: String,
    pub product: String,
    pub category: String,
    pub zip: String,
    pub description: String,
    /// Path of the uploaded photo, `None` until one is stored.
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub file_path: Option<String>,
}

/// A saved post, from the point of view of the user who saved it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritePost {
    pub user_id: i64,
    pub post_id: i64,
    pub owner_id: i64,
    pub price: f64,
    pub quantity: i64,
    pub unit: String,
    pub product: String,
    pub category: String,
    pub zip: String,
    pub description: String,
    pub photo: Option<String>,
}
