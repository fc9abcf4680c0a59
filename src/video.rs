//! Data model and collaborator boundaries for video data acquisition.
//!
//! This crate never talks to YouTube itself. An upstream collaborator
//! implements [`VideoSource`] and hands over a [`VideoData`]; everything
//! downstream treats that data as given.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single top-level comment, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Display name of the comment author.
    pub author: String,
    /// Plain-text comment body.
    pub text: String,
    /// Like count at fetch time.
    pub likes: u64,
}

/// Everything fetched for one video: transcript plus comment thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoData {
    /// Concatenated transcript text; empty when no transcript is available.
    pub transcript: String,
    /// Top-level comments in retrieval order.
    pub comments: Vec<Comment>,
}

/// Upstream collaborator that retrieves transcript and comments for a video.
pub trait VideoSource {
    /// Fetches the transcript and comments for `video_id`.
    fn fetch_data(&self, video_id: &str) -> Result<VideoData>;
}

static VIDEO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:v=|/|be/)([a-zA-Z0-9_-]{11})").expect("hardcoded regex is valid"));

/// Extracts the 11-character video ID from the common YouTube URL formats.
///
/// Handles `watch?v=`, `youtu.be/`, and `/embed/` style links. Returns `None`
/// when no ID can be found.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?start=10"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn rejects_text_without_id() {
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id(""), None);
    }
}
