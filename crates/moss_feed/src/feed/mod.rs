mod builder;
mod derive;
mod pretty;
mod resolver;
mod source;

use anyhow::Result;
use sea_orm::DatabaseConnection;
use thiserror::Error;

pub use crate::feed::builder::{FeedBuilder, FeedOptions};
pub use crate::feed::pretty::pretty_print;
pub use crate::feed::resolver::{LocalMediaResolver, MediaResolver};
pub use crate::feed::source::{get_settings, list_published_episodes, FeedEpisode, PodcastSettings};
use crate::config::Config;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("invalid url \"{0}\"")]
    InvalidUrl(String, #[source] url::ParseError),
}

/// 读取数据库并生成排版后的完整 feed
pub async fn render_feed(db: &DatabaseConnection, config: &Config) -> Result<String> {
    let options = FeedOptions::from_config(config)?;
    let resolver = LocalMediaResolver::from_config(config)?;
    let settings = get_settings(db).await?;
    let episodes = list_published_episodes(db).await?;
    debug!("开始生成 feed，共 {} 集", episodes.len());
    let xml = FeedBuilder::new(&options, &resolver).build(&episodes, &settings)?;
    pretty_print(&xml)
}
