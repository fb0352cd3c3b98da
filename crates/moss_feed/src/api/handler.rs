use std::sync::Arc;

use axum::extract::Extension;
use axum::http::header;
use axum::response::IntoResponse;
use moss_feed_entity::episode;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use utoipa::OpenApi;

use crate::api::response::{EpisodeInfo, EpisodesResponse};
use crate::api::wrapper::{ApiError, ApiResponse};
use crate::config::Config;
use crate::feed::{render_feed, FeedOptions};

#[derive(OpenApi)]
#[openapi(paths(get_episodes))]
pub struct ApiDoc;

/// 播客的 RSS feed
pub async fn get_feed(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
) -> Result<impl IntoResponse, ApiError> {
    let feed = render_feed(&db, &config)
        .await
        .map_err(|e| ApiError::from(e).with_title("Error generating feed"))?;
    Ok(([(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")], feed))
}

/// 列出所有已发布的单集，按编号倒序
#[utoipa::path(
    get,
    path = "/api/episodes",
    responses(
        (status = 200, body = ApiResponse<EpisodesResponse>),
    )
)]
pub async fn get_episodes(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(config): Extension<Arc<Config>>,
) -> Result<ApiResponse<EpisodesResponse>, ApiError> {
    let options = FeedOptions::from_config(&config)?;
    let episodes = episode::Entity::find()
        .filter(episode::Column::Live.eq(true))
        .order_by_desc(episode::Column::EpisodeNumber)
        .all(db.as_ref())
        .await?
        .into_iter()
        .map(|episode| EpisodeInfo {
            link: options.episode_link(episode.episode_number),
            episode_number: episode.episode_number,
            season_number: episode.season_number,
            season_episode_number: episode.season_episode_number,
            title: episode.title,
            slug: episode.slug,
            publication_date: episode.publication_date.to_rfc3339(),
            explicit_content: episode.explicit_content,
        })
        .collect();
    Ok(ApiResponse::ok(EpisodesResponse { episodes }))
}
