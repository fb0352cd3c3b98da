pub mod prelude;

pub mod episode;
pub mod image;
pub mod podcast_settings;
