// Application settings: API credentials, model and logging, stored as JSON.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const MODEL_ENV: &str = "NOGASHIO_MODEL";

pub fn get_game_data_dir() -> Option<PathBuf> {
    dir::home_dir().map(|home| home.join("nogashio").join("data"))
}

#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub openai_api_key: Option<String>, // Optional API key for OpenAI services.
    pub model: String,
    pub api_base: Option<String>, // OpenAI-compatible endpoint, if not the default one.
    pub request_timeout_secs: u64,
    pub debug_mode: bool, // Debug level logging.
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            openai_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            debug_mode: false,
        }
    }
}

// Never print the key itself, the settings end up in the log.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("openai_api_key", &self.openai_api_key.as_deref().map(hide_api))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("debug_mode", &self.debug_mode)
            .finish()
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the settings from the game data directory, then applies the
    /// environment overrides. A missing file yields the defaults.
    pub fn load() -> Result<Self, AppError> {
        let path = get_game_data_dir()
            .ok_or(AppError::HomeDirNotFound)?
            .join("settings.json");
        let settings = if path.exists() {
            Self::load_settings_from_file(&path)?
        } else {
            Self::default()
        };
        Ok(settings.with_env_overrides())
    }

    pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(MODEL_ENV).ok(),
        )
    }

    /// Blank values never override what is already configured.
    pub fn with_overrides(mut self, api_key: Option<String>, model: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.openai_api_key = Some(key.trim().to_string());
        }
        if let Some(model) = model.filter(|model| !model.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.openai_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

pub fn hide_api(s: &str) -> String {
    let head_len = 7;
    let tail_len = 3;

    if s.len() < head_len + tail_len + 3 || !s.is_ascii() {
        return "***".to_string();
    }

    let head = &s[..head_len];
    let tail = &s[s.len() - tail_len..];

    format!("{}...{}", head, tail)
}
