use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;

use farmstand_db::models::{NewPost, PostChanges};
use farmstand_types::api::{
    CreatePostRequest, CreatePostResponse, RowsAffected, SetPhotoRequest, UpdatePostRequest,
};
use farmstand_types::models::{Photo, Post};

use crate::{AppState, found, run_db};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Comma-separated search terms.
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    /// Comma-separated category keys.
    #[serde(default)]
    pub category: String,
}

fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let posts = run_db(&state, |s| s.all_posts()).await?;
    Ok(Json(posts.into_iter().map(Post::from).collect::<Vec<_>>()))
}

/// Insert the post and its empty photo row in the same session.
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let (created, photo) = run_db(&state, move |s| {
        let created = s.create_post(&NewPost {
            user_id: req.user_id,
            price: req.price,
            quantity: req.quantity,
            unit: &req.unit,
            product: &req.product,
            category: &req.category,
            zip: &req.zip,
            description: &req.description,
        })?;
        let photo = s.init_photo(created.id)?;
        Ok((created, photo))
    })
    .await?;

    info!(post_id = created.id, rows = created.rowcount, "Created post");
    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            id: created.id,
            photo: Photo::from(photo),
        }),
    ))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let post = run_db(&state, move |s| s.find_post_by_id(id))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(Post::from(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = run_db(&state, move |s| {
        s.update_post(
            &PostChanges {
                price: req.price,
                quantity: req.quantity,
                unit: &req.unit,
                product: &req.product,
                zip: &req.zip,
                description: &req.description,
            },
            id,
        )
    })
    .await?;
    Ok(Json(RowsAffected { rows: found(rows)? }))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = run_db(&state, move |s| s.delete_post(id)).await?;
    info!(post_id = id, rows, "Delete post");
    Ok(Json(RowsAffected { rows: found(rows)? }))
}

pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let terms = split_terms(&query.q);
    let posts = run_db(&state, move |s| s.search_posts(terms.as_slice())).await?;
    Ok(Json(posts.into_iter().map(Post::from).collect::<Vec<_>>()))
}

pub async fn filter_posts(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let keys = split_terms(&query.category);
    let posts = run_db(&state, move |s| s.filter_posts(keys.as_slice())).await?;
    Ok(Json(posts.into_iter().map(Post::from).collect::<Vec<_>>()))
}

pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let photo = run_db(&state, move |s| s.find_photo_by_id(id))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(Photo::from(photo)))
}

/// Store the path the file-storage layer produced for this post's photo.
pub async fn set_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<SetPhotoRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = run_db(&state, move |s| s.set_photo(id, &req.file_path)).await?;
    Ok(Json(RowsAffected { rows: found(rows)? }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::split_terms;
    use crate::test_utils::{app, list, send, signup};

    fn ids(posts: &Value) -> Vec<i64> {
        posts
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn terms_are_trimmed_and_blank_ones_dropped() {
        assert_eq!(split_terms(" tomato, basil ,,"), ["tomato", "basil"]);
        assert!(split_terms("").is_empty());
    }

    #[tokio::test]
    async fn create_returns_empty_photo() {
        let (_dir, app) = app();
        let mara = signup(&app, "Mara").await;

        let (status, body) = send(
            &app,
            "POST",
            "/posts",
            Some(json!({
                "user_id": mara,
                "price": 2.5,
                "quantity": 12,
                "unit": "each",
                "product": "Eggs",
                "category": "dairy",
                "zip": "97214",
                "description": "Brown eggs",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["photo"]["id"], body["id"]);
        assert!(body["photo"]["file_path"].is_null());

        let id = body["id"].as_i64().unwrap();
        let (status, post) = send(&app, "GET", &format!("/posts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(post["owner"]["name"], "Mara");
        assert!(post["owner"].get("password").is_none());
    }

    #[tokio::test]
    async fn photo_update_and_reread() {
        let (_dir, app) = app();
        let mara = signup(&app, "Mara").await;
        let id = list(&app, mara, "Peaches", "fruit").await;

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/posts/{id}/photo"),
            Some(json!({ "file_path": "photos/peaches.png" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, post) = send(&app, "GET", &format!("/posts/{id}"), None).await;
        assert_eq!(post["photo"], "photos/peaches.png");

        let (status, photo) = send(&app, "GET", &format!("/posts/{id}/photo"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(photo["id"], id);
        assert_eq!(photo["file_path"], "photos/peaches.png");
    }

    #[tokio::test]
    async fn update_and_delete() {
        let (_dir, app) = app();
        let mara = signup(&app, "Mara").await;
        let id = list(&app, mara, "Peaches", "fruit").await;

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/posts/{id}"),
            Some(json!({
                "price": 4.0,
                "quantity": 2,
                "unit": "box",
                "product": "White peaches",
                "zip": "97215",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, post) = send(&app, "GET", &format!("/posts/{id}"), None).await;
        assert_eq!(post["product"], "White peaches");
        assert_eq!(post["category"], "fruit");

        let (status, _) = send(&app, "DELETE", &format!("/posts/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", &format!("/posts/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", &format!("/posts/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_and_filter() {
        let (_dir, app) = app();
        let mara = signup(&app, "Mara").await;
        let tomatoes = list(&app, mara, "Tomatoes", "vegetables").await;
        let basil = list(&app, mara, "Basil", "herbs").await;
        let peaches = list(&app, mara, "Peaches", "fruit").await;

        let (status, found) = send(&app, "GET", "/posts/search?q=TOMATO,basil", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&found), [tomatoes, basil]);

        let (_, found) = send(&app, "GET", "/posts/filter?category=fruit", None).await;
        assert_eq!(ids(&found), [peaches]);

        let (_, all) = send(&app, "GET", "/posts", None).await;
        assert_eq!(ids(&all), [tomatoes, basil, peaches]);
    }
}
