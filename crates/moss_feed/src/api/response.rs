use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct EpisodesResponse {
    pub episodes: Vec<EpisodeInfo>,
}

#[derive(Serialize, ToSchema)]
pub struct EpisodeInfo {
    pub episode_number: i32,
    pub season_number: i32,
    pub season_episode_number: Option<i32>,
    pub title: String,
    pub slug: String,
    /// RFC 3339
    pub publication_date: String,
    pub explicit_content: bool,
    pub link: String,
}
