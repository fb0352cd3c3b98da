use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

mod clap;
mod global;

pub use crate::config::clap::version;
pub use crate::config::global::{load_config, ARGS, CONFIG_DIR};

fn default_bind_address() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_site_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_feed_path() -> String {
    "/feed.xml".to_string()
}

fn default_media_url() -> String {
    "/media/".to_string()
}

/// 相对路径会在加载时基于配置目录展开
fn default_media_root() -> PathBuf {
    PathBuf::from("media")
}

fn default_fallback_cover() -> String {
    "/static/images/podcast-cover.jpg".to_string()
}

fn default_episode_path() -> String {
    "/podcast/".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// 站点的规范地址，feed 中所有链接都基于它生成
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_feed_path")]
    pub feed_path: String,
    /// 媒体文件的访问前缀，可以是站内路径，也可以是 CDN 的完整地址
    #[serde(default = "default_media_url")]
    pub media_url: String,
    #[serde(default = "default_media_root")]
    pub media_root: PathBuf,
    /// 未设置播客封面时使用的图片
    #[serde(default = "default_fallback_cover")]
    pub fallback_cover: String,
    /// 单集页面的路径前缀，单集链接为 `{episode_path}{三位编号}/`
    #[serde(default = "default_episode_path")]
    pub episode_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            site_url: default_site_url(),
            feed_path: default_feed_path(),
            media_url: default_media_url(),
            media_root: default_media_root(),
            fallback_cover: default_fallback_cover(),
            episode_path: default_episode_path(),
        }
    }
}

impl Config {
    /// 检查配置是否可用，返回 false 时服务无法正常生成 feed
    pub fn check(&self) -> bool {
        let mut ok = true;
        match Url::parse(&self.site_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                error!("站点地址必须使用 http 或 https 协议，当前为：{}", url.scheme());
                ok = false;
            }
            Err(e) => {
                error!("站点地址「{}」无法解析：{}", self.site_url, e);
                ok = false;
            }
        }
        for (name, path) in [("feed_path", &self.feed_path), ("episode_path", &self.episode_path)] {
            if !path.starts_with('/') {
                error!("{} 必须以 / 开头，当前为：{}", name, path);
                ok = false;
            }
        }
        if !self.media_url.ends_with('/') {
            warn!("media_url 未以 / 结尾，媒体地址将按目录拼接：{}", self.media_url);
        }
        if !self.media_root.is_dir() {
            warn!(
                "媒体目录「{}」不存在，音频大小将按时长估算",
                self.media_root.display()
            );
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_from_empty_json() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.feed_path, "/feed.xml");
        assert_eq!(config.media_root, PathBuf::from("media"));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config: Config = serde_json::from_str(r#"{"site_url": "https://intothemoss.com"}"#).unwrap();
        assert_eq!(config.site_url, "https://intothemoss.com");
        assert_eq!(config.episode_path, "/podcast/");
    }

    #[test]
    fn test_check_rejects_bad_values() {
        let config = Config {
            site_url: "ftp://intothemoss.com".to_string(),
            ..Default::default()
        };
        assert!(!config.check());

        let config = Config {
            feed_path: "feed.xml".to_string(),
            ..Default::default()
        };
        assert!(!config.check());

        assert!(Config::default().check());
    }
}
