//! Talk videos loaded from `videos.yml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::DataError;

const VIDEOS_FILE: &str = "videos.yml";

/// One conference talk or screencast.
///
/// Carries either a YouTube video id or a direct URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Talk title.
    pub title: String,
    /// YouTube video id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// Direct video URL, for talks hosted elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Speaker name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Conference or event name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Year the talk was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

/// Load the talk videos from `<data_dir>/videos.yml`.
///
/// # Errors
///
/// Returns an error if the file is missing, not valid YAML, or an entry
/// has neither a YouTube id nor a URL.
pub fn load_videos(data_dir: &Path) -> Result<Vec<Video>, DataError> {
    let path = data_dir.join(VIDEOS_FILE);
    let videos: Vec<Video> = crate::load_yaml(&path)?;
    for video in &videos {
        if video.youtube.is_none() && video.url.is_none() {
            return Err(DataError::Invalid {
                path,
                message: format!("video {:?} needs a youtube id or a url", video.title),
            });
        }
    }
    Ok(videos)
}
