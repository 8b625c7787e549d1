pub mod favorites;
pub mod password;
pub mod posts;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tracing::error;

use farmstand_db::{Database, Session};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}", get(users::get_user).put(users::update_user))
        .route("/users/{id}/disable", post(users::disable_user))
        .route("/users/{id}/enable", post(users::enable_user))
        .route("/users/{id}/posts", get(users::user_posts))
        .route("/users/{id}/favorites", get(favorites::list_favorites))
        .route(
            "/users/{id}/favorites/{post_id}",
            post(favorites::add_favorite).delete(favorites::remove_favorite),
        )
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/search", get(posts::search_posts))
        .route("/posts/filter", get(posts::filter_posts))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/posts/{id}/photo",
            get(posts::get_photo).put(posts::set_photo),
        )
        .with_state(state)
}

/// Run one request's database work off the async runtime, on a session
/// opened for this request and closed when `f` returns.
pub(crate) async fn run_db<F, T>(state: &AppState, f: F) -> Result<T, StatusCode>
where
    F: FnOnce(&mut Session) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || db.with_session(f))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("Database error: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Zero rows affected means the target row doesn't exist.
pub(crate) fn found(rows: usize) -> Result<usize, StatusCode> {
    if rows == 0 {
        Err(StatusCode::NOT_FOUND)
    } else {
        Ok(rows)
    }
}
