use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

pub const DEFAULT_FEED_URL: &str = "http://localhost:3333";
pub const DEFAULT_EPISODE_LIMIT: u32 = 12;

/// Error type for database operations on native platforms
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct DbError(String);

#[cfg(not(target_arch = "wasm32"))]
impl DbError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::fmt::Display for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl std::error::Error for DbError {}

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "podplayer.app_settings";

/// App settings stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_episode_limit")]
    pub episode_limit: u32,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_episode_limit() -> u32 {
    DEFAULT_EPISODE_LIMIT
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            episode_limit: default_episode_limit(),
        }
    }
}

impl AppSettings {
    /// Trims the feed URL and keeps the page size within what the home view can lay out.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.feed_url.trim().trim_end_matches('/');
        self.feed_url = if trimmed.is_empty() {
            default_feed_url()
        } else {
            trimmed.to_string()
        };
        self.episode_limit = self.episode_limit.clamp(1, 100);
        self
    }
}

// Database operations for native platforms
// These run directly on desktop/mobile without needing #[server]

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: AppSettings) -> Result<(), DbError> {
    let conn = get_db_connection()?;

    let settings_json =
        serde_json::to_string(&settings).map_err(|e| DbError::new(e.to_string()))?;

    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES ('app_settings', ?1)",
        [&settings_json],
    )
    .map_err(|e| DbError::new(e.to_string()))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: AppSettings) -> Result<(), StorageError> {
    LocalStorage::set(SETTINGS_KEY, settings)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<AppSettings, DbError> {
    let conn = get_db_connection()?;

    let result: Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM settings WHERE key = 'app_settings'",
        [],
        |row: &rusqlite::Row| row.get(0),
    );

    match result {
        Ok(json) => decode_settings(&json),
        Err(_) => Ok(AppSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn decode_settings(json: &str) -> Result<AppSettings, DbError> {
    serde_json::from_str::<AppSettings>(json)
        .map(AppSettings::normalized)
        .map_err(|e| DbError::new(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<AppSettings, StorageError> {
    match LocalStorage::get::<AppSettings>(SETTINGS_KEY) {
        Ok(settings) => Ok(settings.normalized()),
        Err(_) => Ok(AppSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), DbError> {
    let conn = get_db_connection()?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DbError::new(e.to_string()))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), StorageError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, DbError> {
    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("podplayer"))
        .unwrap_or_else(|| std::path::PathBuf::from(".podplayer"));
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| DbError::new(format!("Failed to create data directory: {}", e)))?;
    let db_path = data_dir.join("podplayer.db");

    rusqlite::Connection::open(&db_path)
        .map_err(|e| DbError::new(format!("Failed to open database: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.feed_url, "http://localhost:3333");
        assert_eq!(settings.episode_limit, 12);
    }

    #[test]
    fn settings_survive_storage_encoding() {
        let settings = AppSettings {
            feed_url: "https://feed.example.com".to_string(),
            episode_limit: 30,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let restored: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
    }

    #[test]
    fn normalized_trims_url_and_clamps_limit() {
        let settings = AppSettings {
            feed_url: "  https://feed.example.com/api/  ".to_string(),
            episode_limit: 0,
        }
        .normalized();
        assert_eq!(settings.feed_url, "https://feed.example.com/api");
        assert_eq!(settings.episode_limit, 1);

        let blank = AppSettings {
            feed_url: "   ".to_string(),
            episode_limit: 500,
        }
        .normalized();
        assert_eq!(blank.feed_url, DEFAULT_FEED_URL);
        assert_eq!(blank.episode_limit, 100);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn corrupt_record_is_reported() {
        assert!(decode_settings("not json").is_err());
        let decoded = decode_settings(r#"{"feed_url":"http://x/","episode_limit":4}"#).unwrap();
        assert_eq!(decoded.feed_url, "http://x");
        assert_eq!(decoded.episode_limit, 4);
    }
}
