//! Forum controller.

use crate::{
    responses::{ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use petpal_core::{ErrorResponse, PetpalError, Post};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Query string for the Reddit posts endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RedditPostsQuery {
    /// Subreddit to read. Defaults to `pets`.
    pub subreddit: Option<String>,
}

/// Creates the forum router.
pub fn router() -> Router<AppState> {
    Router::new().route("/reddit/posts", get(get_reddit_posts))
}

/// Get the current posts of a subreddit.
#[utoipa::path(
    get,
    path = "/api/forum/reddit/posts",
    tag = "forum",
    params(RedditPostsQuery),
    responses(
        (status = 200, description = "Normalized posts in upstream order", body = [Post]),
        (status = 400, description = "Invalid query or subreddit name", body = ErrorResponse),
        (
            status = 502,
            description = "Reddit could not be reached or answered badly",
            body = ErrorResponse
        )
    )
)]
pub async fn get_reddit_posts(
    State(state): State<AppState>,
    query: Result<Query<RedditPostsQuery>, QueryRejection>,
) -> ApiResult<Vec<Post>> {
    let Query(query) =
        query.map_err(|rejection| AppError(PetpalError::validation(rejection.body_text())))?;
    let subreddit = query
        .subreddit
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| state.forum_service.default_subreddit().to_string());
    debug!("Get Reddit posts request: {}", subreddit);

    let posts = state.forum_service.get_posts(&subreddit).await?;
    Ok(Json(posts))
}
