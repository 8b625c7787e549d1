//! Database row types: these map directly to SQLite rows.
//! Distinct from farmstand-types API models to keep the DB layer independent.

use farmstand_types::models::{FavoritePost, Owner, Photo, Post, User};

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub rating: f64,
    pub active: bool,
}

/// A post joined with its owner and (possibly empty) photo.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRow {
    pub post_id: i64,
    pub user_id: i64,
    pub price: f64,
    pub quantity: i64,
    pub unit: String,
    pub product: String,
    pub category: String,
    pub zip: String,
    pub description: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_rating: f64,
    pub owner_active: bool,
    pub file_path: Option<String>,
}

/// Fields supplied when a post is created.
#[derive(Debug, Clone, Copy)]
pub struct NewPost<'a> {
    pub user_id: i64,
    pub price: f64,
    pub quantity: i64,
    pub unit: &'a str,
    pub product: &'a str,
    pub category: &'a str,
    pub zip: &'a str,
    pub description: &'a str,
}

/// Fields an edit may change. Owner and category are fixed at creation.
#[derive(Debug, Clone, Copy)]
pub struct PostChanges<'a> {
    pub price: f64,
    pub quantity: i64,
    pub unit: &'a str,
    pub product: &'a str,
    pub zip: &'a str,
    pub description: &'a str,
}

/// Result of inserting a post: the generated id and the insert's row count
/// (1 on success).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedPost {
    pub id: i64,
    pub rowcount: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRow {
    pub id: i64,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteRow {
    pub user_id: i64,
    pub post_id: i64,
}

/// A favorite joined with the favorited post and its photo.
/// `user_id` is the user who saved it; `owner_id` is who listed the post.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritePostRow {
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
    pub file_path: Option<String>,
}

// Passwords stay in the DB layer.
impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            rating: row.rating,
            active: row.active,
        }
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.post_id,
            owner: Owner {
                id: row.user_id,
                name: row.owner_name,
                email: row.owner_email,
                rating: row.owner_rating,
                active: row.owner_active,
            },
            price: row.price,
            quantity: row.quantity,
            unit: row.unit,
            product: row.product,
            category: row.category,
            zip: row.zip,
            description: row.description,
            photo: row.file_path,
        }
    }
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Self {
            id: row.id,
            file_path: row.file_path,
        }
    }
}

impl From<FavoritePostRow> for FavoritePost {
    fn from(row: FavoritePostRow) -> Self {
        Self {
            user_id: row.user_id,
            post_id: row.post_id,
            owner_id: row.owner_id,
            price: row.price,
            quantity: row.quantity,
            unit: row.unit,
            product: row.product,
            category: row.category,
            zip: row.zip,
            description: row.description,
            photo: row.file_path,
        }
    }
}
