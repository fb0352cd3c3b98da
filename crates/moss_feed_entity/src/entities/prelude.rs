pub use super::episode::Entity as Episode;
pub use super::image::Entity as Image;
pub use super::podcast_settings::Entity as PodcastSettings;
