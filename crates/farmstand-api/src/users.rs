use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use farmstand_types::api::{CreateUserRequest, RowsAffected, UpdateUserRequest};
use farmstand_types::models::{Post, User};

use crate::password::hash_password;
use crate::{AppState, found, run_db};

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = run_db(&state, move |s| {
        let password_hash = hash_password(&req.password)?;
        s.create_user(&req.name, &req.email, &password_hash, req.rating, req.active)
    })
    .await?;

    info!("Created user ({} row)", rows);
    Ok((StatusCode::CREATED, Json(RowsAffected { rows })))
}

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let users = run_db(&state, |s| s.all_users()).await?;
    Ok(Json(users.into_iter().map(User::from).collect::<Vec<_>>()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let user = run_db(&state, move |s| s.find_user_by_id(id))
        .await?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(User::from(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = run_db(&state, move |s| {
        let password_hash = hash_password(&req.password)?;
        s.update_user(&req.name, &req.email, &password_hash, id)
    })
    .await?;
    Ok(Json(RowsAffected { rows: found(rows)? }))
}

pub async fn disable_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = run_db(&state, move |s| s.disable_user(id)).await?;
    info!(user_id = id, "Disabled user");
    Ok(Json(RowsAffected { rows: found(rows)? }))
}

pub async fn enable_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = run_db(&state, move |s| s.enable_user(id)).await?;
    info!(user_id = id, "Enabled user");
    Ok(Json(RowsAffected { rows: found(rows)? }))
}

/// Listings of one seller; empty while that seller is disabled.
pub async fn user_posts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let posts = run_db(&state, move |s| s.posts_by_user(id)).await?;
    Ok(Json(posts.into_iter().map(Post::from).collect::<Vec<_>>()))
}
