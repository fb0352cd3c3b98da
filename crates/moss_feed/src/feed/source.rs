//! feed 的数据来源：已发布的单集与播客设置

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use moss_feed_entity::{episode, image, podcast_settings};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// 构建 feed 所需的单集快照
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEpisode {
    pub episode_number: i32,
    pub season_number: i32,
    pub season_episode_number: Option<i32>,
    pub title: String,
    pub description: String,
    pub publication_date: DateTime<FixedOffset>,
    pub audio_file: String,
    pub duration_in_seconds: Option<f64>,
    /// 封面图片文件路径
    pub cover_image: Option<String>,
    pub explicit_content: bool,
    pub guid: String,
}

impl From<(episode::Model, Option<image::Model>)> for FeedEpisode {
    fn from((episode, cover): (episode::Model, Option<image::Model>)) -> Self {
        Self {
            episode_number: episode.episode_number,
            season_number: episode.season_number,
            season_episode_number: episode.season_episode_number,
            title: episode.title,
            description: episode.description,
            publication_date: episode.publication_date,
            audio_file: episode.audio_file,
            duration_in_seconds: episode.duration_in_seconds,
            cover_image: cover.map(|image| image.file),
            explicit_content: episode.explicit_content,
            guid: episode.guid,
        }
    }
}

/// 播客设置，所有字段都有默认值，未配置时 feed 也能正常生成
#[derive(Debug, Clone, PartialEq)]
pub struct PodcastSettings {
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    pub description: String,
    pub author: String,
    pub owner_name: String,
    pub email: String,
    pub cover_image: Option<String>,
    pub copyright_notice: String,
    pub language: String,
}

impl Default for PodcastSettings {
    fn default() -> Self {
        Self {
            title: "Your Podcast".to_string(),
            subtitle: "A sunken raft of weeds woven into a verdant morass of sound, song and story".to_string(),
            summary: "Your podcast is a 14 minute drift through original music, soundscapes and liminal yarns"
                .to_string(),
            description: "A sunken raft of weeds woven into a verdant morass of sound, song and story. \
                Broadcast on London's Resonance FM every Friday, Your podcast is a 14 minute drift through \
                original music, soundscapes and liminal yarns."
                .to_string(),
            author: "Your Name".to_string(),
            owner_name: "Your Name".to_string(),
            email: "your@email.com".to_string(),
            cover_image: None,
            copyright_notice: "© Your Podcast 2025".to_string(),
            language: "en-uk".to_string(),
        }
    }
}

impl From<(podcast_settings::Model, Option<image::Model>)> for PodcastSettings {
    fn from((settings, cover): (podcast_settings::Model, Option<image::Model>)) -> Self {
        Self {
            title: settings.title,
            subtitle: settings.subtitle,
            summary: settings.summary,
            description: settings.description,
            author: settings.author,
            owner_name: settings.owner_name,
            email: settings.email,
            cover_image: cover.map(|image| image.file),
            copyright_notice: settings.copyright_notice,
            language: settings.language,
        }
    }
}

/// 已发布的单集，按发布时间倒序
pub async fn list_published_episodes(db: &DatabaseConnection) -> Result<Vec<FeedEpisode>> {
    let episodes = episode::Entity::find()
        .filter(episode::Column::Live.eq(true))
        .find_also_related(image::Entity)
        .order_by_desc(episode::Column::PublicationDate)
        .all(db)
        .await
        .context("读取已发布单集失败")?;
    Ok(episodes.into_iter().map(FeedEpisode::from).collect())
}

/// 读取播客设置，数据库中没有记录时返回默认设置
pub async fn get_settings(db: &DatabaseConnection) -> Result<PodcastSettings> {
    let settings = podcast_settings::Entity::find()
        .find_also_related(image::Entity)
        .order_by_asc(podcast_settings::Column::Id)
        .one(db)
        .await
        .context("读取播客设置失败")?;
    Ok(match settings {
        Some(row) => PodcastSettings::from(row),
        None => {
            debug!("未配置播客设置，使用默认值");
            PodcastSettings::default()
        }
    })
}
