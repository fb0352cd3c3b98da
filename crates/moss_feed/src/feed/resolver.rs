use std::path::{Path, PathBuf};

use url::Url;

use crate::config::Config;
use crate::feed::FeedError;

/// 将存储的文件路径解析为绝对地址，并尽可能获取文件大小
pub trait MediaResolver {
    /// 媒体目录下的文件地址
    fn media_url(&self, path: &str) -> String;

    /// 站内路径（如静态资源）的绝对地址
    fn site_url(&self, path: &str) -> String;

    /// 文件在本地存在时返回字节数
    fn file_size(&self, path: &str) -> Option<u64>;
}

/// 基于本地媒体目录的解析器
pub struct LocalMediaResolver {
    site_url: Url,
    media_url: Url,
    media_root: PathBuf,
}

impl LocalMediaResolver {
    pub fn new(site_url: Url, media_url: &str, media_root: impl Into<PathBuf>) -> Result<Self, FeedError> {
        let media_url = if media_url.ends_with('/') {
            media_url.to_string()
        } else {
            format!("{}/", media_url)
        };
        let media_url = site_url
            .join(&media_url)
            .map_err(|e| FeedError::InvalidUrl(media_url.clone(), e))?;
        Ok(Self {
            site_url,
            media_url,
            media_root: media_root.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        let site_url = Url::parse(&config.site_url).map_err(|e| FeedError::InvalidUrl(config.site_url.clone(), e))?;
        Self::new(site_url, &config.media_url, &config.media_root)
    }
}

impl MediaResolver for LocalMediaResolver {
    fn media_url(&self, path: &str) -> String {
        join_or_raw(&self.media_url, path.trim_start_matches('/'))
    }

    fn site_url(&self, path: &str) -> String {
        join_or_raw(&self.site_url, path)
    }

    fn file_size(&self, path: &str) -> Option<u64> {
        let full_path = self.media_root.join(Path::new(path.trim_start_matches('/')));
        match std::fs::metadata(&full_path) {
            Ok(metadata) if metadata.is_file() => Some(metadata.len()),
            Ok(_) => None,
            Err(e) => {
                debug!("无法读取媒体文件 {} 的大小：{}", full_path.display(), e);
                None
            }
        }
    }
}

fn join_or_raw(base: &Url, path: &str) -> String {
    match base.join(path) {
        Ok(url) => url.to_string(),
        Err(e) => {
            warn!("无法拼接地址 {} + {}：{}", base, path, e);
            format!("{}{}", base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(media_url: &str, media_root: &Path) -> LocalMediaResolver {
        LocalMediaResolver::new(Url::parse("https://intothemoss.com").unwrap(), media_url, media_root).unwrap()
    }

    #[test]
    fn test_media_url_relative_to_site() {
        let resolver = resolver("/media/", Path::new("/nonexistent"));
        assert_eq!(
            resolver.media_url("episodes/007.mp3"),
            "https://intothemoss.com/media/episodes/007.mp3"
        );
        assert_eq!(
            resolver.media_url("/episodes/007.mp3"),
            "https://intothemoss.com/media/episodes/007.mp3"
        );
    }

    #[test]
    fn test_media_url_on_cdn() {
        let resolver = resolver("https://cdn.example.com/moss", Path::new("/nonexistent"));
        assert_eq!(
            resolver.media_url("episodes/007.mp3"),
            "https://cdn.example.com/moss/episodes/007.mp3"
        );
    }

    #[test]
    fn test_site_url() {
        let resolver = resolver("/media/", Path::new("/nonexistent"));
        assert_eq!(
            resolver.site_url("/static/images/podcast-cover.jpg"),
            "https://intothemoss.com/static/images/podcast-cover.jpg"
        );
    }

    #[test]
    fn test_file_size() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("episodes")).unwrap();
        std::fs::write(dir.path().join("episodes/001.mp3"), vec![0u8; 1234]).unwrap();

        let resolver = resolver("/media/", dir.path());
        assert_eq!(resolver.file_size("episodes/001.mp3"), Some(1234));
        assert_eq!(resolver.file_size("episodes/002.mp3"), None);
        // 目录不算文件
        assert_eq!(resolver.file_size("episodes"), None);
    }
}
