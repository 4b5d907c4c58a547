use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A playable podcast episode, immutable once loaded from the feed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub url: String,
    /// MIME type of `url` when the feed names one.
    pub media_type: Option<String>,
    /// Length in seconds, as published by the feed.
    pub duration: u32,
    pub published_at: Option<NaiveDateTime>,
    pub description: String,
}

impl Episode {
    pub fn published_label(&self) -> String {
        self.published_at
            .map(|date| date.format("%d %b %y").to_string())
            .unwrap_or_default()
    }
}

/// Episode record as served by the feed (`/episodes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEpisode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub file: FeedFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedFile {
    pub url: String,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
    #[serde(default)]
    pub duration: u32,
}

impl From<FeedEpisode> for Episode {
    fn from(raw: FeedEpisode) -> Self {
        Self {
            published_at: raw.published_at.as_deref().and_then(parse_published_at),
            id: raw.id,
            title: raw.title,
            members: raw.members,
            thumbnail: raw.thumbnail,
            url: raw.file.url,
            media_type: raw.file.media_type,
            duration: raw.file.duration,
            description: raw.description,
        }
    }
}

/// Feeds publish either RFC 3339 timestamps or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_published_at(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_episode_maps_file_fields() {
        let raw = FeedEpisode {
            id: "a-importancia-da-contribuicao-em-open-source".to_string(),
            title: "Faladev #30".to_string(),
            members: "Diego and Richard".to_string(),
            published_at: Some("2021-01-22 11:00:00".to_string()),
            thumbnail: "https://example.com/thumb.jpg".to_string(),
            description: "<p>Open source</p>".to_string(),
            file: FeedFile {
                url: "https://example.com/ep30.m4a".to_string(),
                media_type: Some("audio/x-m4a".to_string()),
                duration: 3981,
            },
        };

        let episode = Episode::from(raw);
        assert_eq!(episode.url, "https://example.com/ep30.m4a");
        assert_eq!(episode.media_type.as_deref(), Some("audio/x-m4a"));
        assert_eq!(episode.duration, 3981);
        assert_eq!(episode.published_label(), "22 Jan 21");
    }

    #[test]
    fn published_at_accepts_rfc3339() {
        let parsed = parse_published_at("2021-02-03T10:30:00Z").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2021-02-03 10:30");
    }

    #[test]
    fn published_at_rejects_garbage() {
        assert!(parse_published_at("").is_none());
        assert!(parse_published_at("yesterday").is_none());
    }
}
