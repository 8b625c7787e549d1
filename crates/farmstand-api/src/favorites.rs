use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use farmstand_types::api::RowsAffected;
use farmstand_types::models::FavoritePost;

use crate::{AppState, found, run_db};

pub async fn list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let favorites = run_db(&state, move |s| s.favorites_by_user(user_id)).await?;
    Ok(Json(
        favorites
            .into_iter()
            .map(FavoritePost::from)
            .collect::<Vec<_>>(),
    ))
}

/// The table allows duplicate pairs, so check before inserting.
pub async fn add_favorite(
    State(state): State<AppState>,
    Path((user_id, post_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, StatusCode> {
    let added = run_db(&state, move |s| {
        if !s.find_duplicate_favorites(user_id, post_id)?.is_empty() {
            return Ok(None);
        }
        s.add_favorite(user_id, post_id).map(Some)
    })
    .await?;

    let rows = added.ok_or(StatusCode::CONFLICT)?;
    Ok((StatusCode::CREATED, Json(RowsAffected { rows })))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((user_id, post_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = run_db(&state, move |s| s.delete_favorite(user_id, post_id)).await?;
    Ok(Json(RowsAffected { rows: found(rows)? }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_utils::{app, list, send, signup};

    #[tokio::test]
    async fn second_add_conflicts() {
        let (_dir, app) = app();
        let mara = signup(&app, "Mara").await;
        let jun = signup(&app, "Jun").await;
        let post = list(&app, mara, "Peaches", "fruit").await;

        let uri = format!("/users/{jun}/favorites/{post}");
        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["rows"], 1);

        let (status, _) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, favorites) = send(&app, "GET", &format!("/users/{jun}/favorites"), None).await;
        let favorites = favorites.as_array().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0]["post_id"], post);
        assert_eq!(favorites[0]["owner_id"], mara);
    }

    #[tokio::test]
    async fn remove_then_remove_again() {
        let (_dir, app) = app();
        let mara = signup(&app, "Mara").await;
        let jun = signup(&app, "Jun").await;
        let post = list(&app, mara, "Peaches", "fruit").await;
        let uri = format!("/users/{jun}/favorites/{post}");
        send(&app, "POST", &uri, None).await;

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn favorite_of_missing_post_is_server_error() {
        let (_dir, app) = app();
        let jun = signup(&app, "Jun").await;

        let (status, _) = send(&app, "POST", &format!("/users/{jun}/favorites/999"), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
