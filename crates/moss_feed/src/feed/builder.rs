//! RSS 2.0 + iTunes feed 的生成

use std::io::Write;

use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use url::Url;

use crate::config::Config;
use crate::feed::derive::{
    channel_explicit, enclosure_length, explicit_flag, feed_episode_number, format_duration, format_pub_date, guid,
    padded_episode_number,
};
use crate::feed::{FeedEpisode, FeedError, MediaResolver, PodcastSettings};

const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// 固定输出的 iTunes 分类（父分类，子分类）
const ITUNES_CATEGORIES: [(&str, &str); 2] = [("Fiction", "Drama"), ("Fiction", "Comedy Fiction")];

/// feed 中与站点地址相关的参数
#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub site_url: Url,
    pub feed_url: Url,
    pub fallback_cover: String,
    pub episode_path: String,
}

impl FeedOptions {
    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        let site_url = Url::parse(&config.site_url).map_err(|e| FeedError::InvalidUrl(config.site_url.clone(), e))?;
        let feed_url = site_url
            .join(&config.feed_path)
            .map_err(|e| FeedError::InvalidUrl(config.feed_path.clone(), e))?;
        Ok(Self {
            site_url,
            feed_url,
            fallback_cover: config.fallback_cover.clone(),
            episode_path: config.episode_path.clone(),
        })
    }

    /// 单集页面的规范地址
    pub fn episode_link(&self, episode_number: i32) -> String {
        let path = format!(
            "{}/{}/",
            self.episode_path.trim_end_matches('/'),
            padded_episode_number(episode_number)
        );
        match self.site_url.join(&path) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.site_url.as_str().trim_end_matches('/'), path),
        }
    }
}

pub struct FeedBuilder<'a, R> {
    options: &'a FeedOptions,
    resolver: &'a R,
}

impl<'a, R: MediaResolver> FeedBuilder<'a, R> {
    pub fn new(options: &'a FeedOptions, resolver: &'a R) -> Self {
        Self { options, resolver }
    }

    /// 生成未格式化的 feed 文档，单集按发布时间倒序输出
    pub fn build(&self, episodes: &[FeedEpisode], settings: &PodcastSettings) -> Result<String> {
        let mut ordered: Vec<&FeedEpisode> = episodes.iter().collect();
        ordered.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));

        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("rss").with_attributes([
            ("version", "2.0"),
            ("xmlns:itunes", ITUNES_NAMESPACE),
            ("xmlns:content", CONTENT_NAMESPACE),
            ("xmlns:atom", ATOM_NAMESPACE),
        ])))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        let channel_cover = match &settings.cover_image {
            Some(file) => self.resolver.media_url(file),
            None => self.resolver.site_url(&self.options.fallback_cover),
        };
        self.write_channel(&mut writer, &ordered, settings, &channel_cover)?;
        for episode in &ordered {
            self.write_item(&mut writer, episode, &channel_cover)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_channel<W: Write>(
        &self,
        writer: &mut Writer<W>,
        episodes: &[&FeedEpisode],
        settings: &PodcastSettings,
        channel_cover: &str,
    ) -> Result<()> {
        let site_url = self.options.site_url.as_str();

        text_element(writer, "title", &settings.title)?;
        text_element(writer, "link", site_url)?;
        text_element(writer, "description", &settings.description)?;
        writer
            .create_element("atom:link")
            .with_attribute(("href", self.options.feed_url.as_str()))
            .with_attribute(("rel", "self"))
            .with_attribute(("type", "application/rss+xml"))
            .write_empty()?;
        text_element(writer, "language", &settings.language)?;
        text_element(writer, "copyright", &settings.copyright_notice)?;
        if let Some(latest) = episodes.first() {
            text_element(writer, "lastBuildDate", &format_pub_date(&latest.publication_date))?;
        }

        text_element(writer, "itunes:subtitle", &settings.subtitle)?;
        text_element(writer, "itunes:author", &settings.author)?;
        text_element(writer, "itunes:summary", &settings.summary)?;
        for (category, subcategory) in ITUNES_CATEGORIES {
            writer.write_event(Event::Start(
                BytesStart::new("itunes:category").with_attributes([("text", category)]),
            ))?;
            writer
                .create_element("itunes:category")
                .with_attribute(("text", subcategory))
                .write_empty()?;
            writer.write_event(Event::End(BytesEnd::new("itunes:category")))?;
        }

        writer.write_event(Event::Start(BytesStart::new("itunes:owner")))?;
        text_element(writer, "itunes:name", &settings.owner_name)?;
        text_element(writer, "itunes:email", &settings.email)?;
        writer.write_event(Event::End(BytesEnd::new("itunes:owner")))?;

        writer
            .create_element("itunes:image")
            .with_attribute(("href", channel_cover))
            .write_empty()?;
        writer.write_event(Event::Start(BytesStart::new("image")))?;
        text_element(writer, "url", channel_cover)?;
        text_element(writer, "title", &settings.title)?;
        text_element(writer, "link", site_url)?;
        writer.write_event(Event::End(BytesEnd::new("image")))?;

        text_element(
            writer,
            "itunes:explicit",
            explicit_flag(channel_explicit(episodes.iter().copied())),
        )?;
        Ok(())
    }

    fn write_item<W: Write>(&self, writer: &mut Writer<W>, episode: &FeedEpisode, channel_cover: &str) -> Result<()> {
        let padded = padded_episode_number(episode.episode_number);
        let length = enclosure_length(
            self.resolver.file_size(&episode.audio_file),
            episode.duration_in_seconds,
        );
        let cover = match &episode.cover_image {
            Some(file) => self.resolver.media_url(file),
            None => channel_cover.to_string(),
        };

        writer.write_event(Event::Start(BytesStart::new("item")))?;
        text_element(writer, "itunes:episode", &feed_episode_number(episode).to_string())?;
        text_element(writer, "itunes:season", &episode.season_number.to_string())?;
        text_element(writer, "title", &episode.title)?;
        text_element(writer, "description", &episode.description)?;
        writer
            .create_element("enclosure")
            .with_attribute(("url", self.resolver.media_url(&episode.audio_file).as_str()))
            .with_attribute(("length", length.to_string().as_str()))
            .with_attribute(("type", "audio/mpeg"))
            .write_empty()?;
        text_element(writer, "link", &self.options.episode_link(episode.episode_number))?;
        writer
            .create_element("itunes:image")
            .with_attribute(("href", cover.as_str()))
            .write_empty()?;
        writer
            .create_element("guid")
            .with_attribute(("isPermaLink", "false"))
            .write_text_content(BytesText::new(&guid(episode)))?;
        text_element(writer, "epid", &padded)?;
        text_element(writer, "pubDate", &format_pub_date(&episode.publication_date))?;
        text_element(writer, "itunes:duration", &format_duration(episode.duration_in_seconds))?;
        text_element(writer, "itunes:explicit", explicit_flag(episode.explicit_content))?;
        text_element(writer, "itunes:summary", &episode.description)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;

        trace!(
            "已写入第 {} 集：enclosure 长度 {}，时长 {}",
            padded,
            length,
            format_duration(episode.duration_in_seconds)
        );
        Ok(())
    }
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.create_element(name).write_text_content(BytesText::new(text))?;
    Ok(())
}
