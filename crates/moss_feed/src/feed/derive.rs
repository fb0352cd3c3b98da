//! feed 中逐项字段的推导规则

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};

use crate::feed::FeedEpisode;

/// 缺少时长时使用的默认值（约 14 分钟）
pub const DEFAULT_DURATION_SECONDS: f64 = 840.05;

/// 文件大小与时长都无法获取时的 enclosure 长度
pub const FALLBACK_ENCLOSURE_LENGTH: u64 = 15_000_000;

/// 按时长估算文件大小时的每秒字节数
pub const ESTIMATED_BYTES_PER_SECOND: f64 = 15_000.0;

/// 超过该值的时长被视为以错误的单位存储
const MAX_PLAUSIBLE_DURATION: f64 = 3600.0;

/// itunes:episode，优先使用季内编号
pub fn feed_episode_number(episode: &FeedEpisode) -> i32 {
    episode.season_episode_number.unwrap_or(episode.episode_number)
}

pub fn padded_episode_number(episode_number: i32) -> String {
    moss_feed_entity::episode::padded_number(episode_number)
}

pub fn guid(episode: &FeedEpisode) -> Cow<'_, str> {
    if episode.guid.is_empty() {
        Cow::Owned(format!("itm-ep{}", episode.episode_number))
    } else {
        Cow::Borrowed(&episode.guid)
    }
}

/// enclosure 长度：真实文件大小 → 按时长估算 → 固定值
pub fn enclosure_length(file_size: Option<u64>, duration_in_seconds: Option<f64>) -> u64 {
    if let Some(size) = file_size {
        return size;
    }
    match duration_in_seconds {
        Some(duration) if duration.is_finite() && duration > 0.0 => (duration * ESTIMATED_BYTES_PER_SECOND).round() as u64,
        _ => FALLBACK_ENCLOSURE_LENGTH,
    }
}

/// itunes:duration，固定两位小数
pub fn format_duration(duration_in_seconds: Option<f64>) -> String {
    let mut duration = duration_in_seconds.unwrap_or(DEFAULT_DURATION_SECONDS);
    if duration > MAX_PLAUSIBLE_DURATION {
        duration /= 60.0;
    }
    format!("{:.2}", duration)
}

/// RFC 2822 风格的日期，例如 `Fri, 07 Mar 2025 18:30:00 +0000`
pub fn format_pub_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}

pub fn explicit_flag(explicit: bool) -> &'static str {
    if explicit {
        "true"
    } else {
        "false"
    }
}

/// 频道级 explicit：任意一集为 explicit 即为 true
pub fn channel_explicit<'a>(episodes: impl IntoIterator<Item = &'a FeedEpisode>) -> bool {
    episodes.into_iter().any(|episode| episode.explicit_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn episode(episode_number: i32) -> FeedEpisode {
        FeedEpisode {
            episode_number,
            season_number: 1,
            season_episode_number: None,
            title: format!("Episode {}", episode_number),
            description: String::new(),
            publication_date: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
                .unwrap(),
            audio_file: format!("episodes/{:03}.mp3", episode_number),
            duration_in_seconds: None,
            cover_image: None,
            explicit_content: false,
            guid: String::new(),
        }
    }

    #[test]
    fn test_feed_episode_number() {
        let mut ep = episode(12);
        assert_eq!(feed_episode_number(&ep), 12);
        ep.season_episode_number = Some(4);
        assert_eq!(feed_episode_number(&ep), 4);
    }

    #[test]
    fn test_guid_fallback() {
        let mut ep = episode(7);
        assert_eq!(guid(&ep), "itm-ep7");
        ep.guid = "itm20240105".to_string();
        assert_eq!(guid(&ep), "itm20240105");
    }

    #[test]
    fn test_padded_episode_number() {
        assert_eq!(padded_episode_number(7), "007");
        assert_eq!(padded_episode_number(120), "120");
    }

    #[test]
    fn test_enclosure_length_cascade() {
        assert_eq!(enclosure_length(Some(4321), Some(840.0)), 4321);
        assert_eq!(enclosure_length(None, Some(840.0)), 840 * 1000 * 15);
        assert_eq!(enclosure_length(None, None), FALLBACK_ENCLOSURE_LENGTH);
        assert_eq!(enclosure_length(None, Some(0.0)), FALLBACK_ENCLOSURE_LENGTH);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(900.0)), "900.00");
        assert_eq!(format_duration(Some(5000.0)), "83.33");
        assert_eq!(format_duration(Some(3600.0)), "3600.00");
        assert_eq!(format_duration(None), "840.05");
    }

    #[test]
    fn test_format_pub_date() {
        let date = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 7, 18, 30, 5)
            .unwrap();
        assert_eq!(format_pub_date(&date), "Fri, 07 Mar 2025 18:30:05 +0100");
    }

    #[test]
    fn test_channel_explicit() {
        let mut episodes = vec![episode(1), episode(2)];
        assert!(!channel_explicit(&episodes));
        episodes[1].explicit_content = true;
        assert!(channel_explicit(&episodes));
        assert!(!channel_explicit(&Vec::<FeedEpisode>::new()));
    }
}
