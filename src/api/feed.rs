use crate::api::models::*;
use crate::db::AppSettings;
use dioxus::logger::tracing::{debug, warn};
use once_cell::sync::Lazy;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("feed responded with HTTP {0}")]
    Status(u16),
    #[error("could not read feed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("episode \"{0}\" was not found")]
    NotFound(String),
}

/// Client for a json-server style episode feed.
pub struct FeedClient {
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(&settings.feed_url)
    }

    fn episodes_url(&self, limit: u32) -> String {
        format!(
            "{}/episodes?_limit={}&_sort=published_at&_order=desc",
            self.base_url, limit
        )
    }

    fn episode_url(&self, id: &str) -> String {
        format!("{}/episodes/{}", self.base_url, urlencoding::encode(id))
    }

    /// Newest episodes first.
    pub async fn latest_episodes(&self, limit: u32) -> Result<Vec<Episode>, FeedError> {
        let url = self.episodes_url(limit.max(1));
        debug!(%url, "loading episode feed");
        let body = fetch_text(&url, None).await?;
        let episodes = decode_episodes(&body)?;
        debug!(count = episodes.len(), "episode feed loaded");
        Ok(episodes)
    }

    pub async fn episode(&self, id: &str) -> Result<Episode, FeedError> {
        let url = self.episode_url(id);
        let body = fetch_text(&url, Some(id)).await?;
        decode_episode(&body)
    }
}

async fn fetch_text(url: &str, episode_id: Option<&str>) -> Result<String, FeedError> {
    let response = HTTP_CLIENT.get(url).send().await?;
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        if let Some(id) = episode_id {
            return Err(FeedError::NotFound(id.to_string()));
        }
    }
    if !status.is_success() {
        warn!(%url, status = status.as_u16(), "feed request rejected");
        return Err(FeedError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

pub fn decode_episodes(body: &str) -> Result<Vec<Episode>, FeedError> {
    let raw: Vec<FeedEpisode> = serde_json::from_str(body)?;
    Ok(raw.into_iter().map(Episode::from).collect())
}

pub fn decode_episode(body: &str) -> Result<Episode, FeedError> {
    let raw: FeedEpisode = serde_json::from_str(body)?;
    Ok(raw.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"[
        {
            "id": "como-virar-lider-desenvolvendo",
            "title": "Como virar líder desenvolvendo",
            "members": "Tiago, Diego e Pellizzetti",
            "published_at": "2021-01-21 11:00:00",
            "thumbnail": "https://example.com/lider.jpg",
            "description": "<p>Leadership</p>",
            "file": { "url": "https://example.com/lider.m4a", "type": "audio/x-m4a", "duration": 3235 }
        },
        {
            "id": "typescript",
            "title": "TypeScript",
            "members": "Diego",
            "published_at": "2021-01-20 11:00:00",
            "thumbnail": "https://example.com/ts.jpg",
            "file": { "url": "https://example.com/ts.m4a", "duration": 1500 }
        }
    ]"#;

    #[test]
    fn decodes_feed_in_order() {
        let episodes = decode_episodes(FEED).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].id, "como-virar-lider-desenvolvendo");
        assert_eq!(episodes[0].media_type.as_deref(), Some("audio/x-m4a"));
        assert_eq!(episodes[1].duration, 1500);
        assert_eq!(episodes[1].media_type, None);
        assert_eq!(episodes[1].description, "");
    }

    #[test]
    fn malformed_feed_is_a_decode_error() {
        let err = decode_episodes(r#"{"episodes": []}"#).unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[test]
    fn builds_json_server_urls() {
        let client = FeedClient::new(" http://localhost:3333/ ");
        assert_eq!(
            client.episodes_url(12),
            "http://localhost:3333/episodes?_limit=12&_sort=published_at&_order=desc"
        );
        assert_eq!(
            client.episode_url("a b"),
            "http://localhost:3333/episodes/a%20b"
        );
    }
}
