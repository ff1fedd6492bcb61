use log::Level;
use wasm_bindgen::JsValue;
use web_sys::window;

/// Prediction API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Build-time override of the API base, e.g. `DIARISK_API_URL=https://api.example.com trunk build`.
const BUILD_API_URL: Option<&str> = option_env!("DIARISK_API_URL");

const KEY_API_URL: &str = "diarisk_api_url";
const KEY_LOG_LEVEL: &str = "diarisk_log_level";
const KEY_TOAST_DURATION: &str = "diarisk_toast_duration_ms";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Base URL of the prediction API, without trailing slash
    pub api_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_url: normalize_api_url(BUILD_API_URL.unwrap_or(DEFAULT_API_URL)),
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
        }
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(api_url)) = storage.get_item(KEY_API_URL) {
                    if !api_url.trim().is_empty() {
                        settings.api_url = normalize_api_url(&api_url);
                    }
                }

                if let Ok(Some(log_level)) = storage.get_item(KEY_LOG_LEVEL) {
                    settings.log_level = parse_log_level(&log_level).unwrap_or(settings.log_level);
                }

                if let Ok(Some(duration)) = storage.get_item(KEY_TOAST_DURATION) {
                    if let Ok(duration) = duration.parse::<u32>() {
                        settings.toast_duration_ms = duration;
                    }
                }
            }
        }

        settings
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item(KEY_API_URL, &self.api_url)?;
                storage.set_item(KEY_LOG_LEVEL, &self.log_level.as_str().to_lowercase())?;
                storage.set_item(KEY_TOAST_DURATION, &self.toast_duration_ms.to_string())?;
            }
        }
        Ok(())
    }

    /// Drop stored overrides so the next start uses the defaults again
    pub fn reset_storage() -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                for key in [KEY_API_URL, KEY_LOG_LEVEL, KEY_TOAST_DURATION] {
                    storage.remove_item(key)?;
                }
            }
        }
        Ok(())
    }

    /// Get the base API URL
    pub fn api_base_url(&self) -> &str {
        &self.api_url
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        join_endpoint(self.api_base_url(), endpoint)
    }
}

/// Trims whitespace and trailing slashes so endpoint paths can be appended.
pub fn normalize_api_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Appends an endpoint path such as `/health` to an API base.
pub fn join_endpoint(base: &str, endpoint: &str) -> String {
    format!("{}{}", normalize_api_url(base), endpoint)
}

pub fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| {
        let mut settings = s.borrow_mut();
        f(&mut settings);
    });
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_url() {
        assert_eq!(normalize_api_url(" http://localhost:8000/ "), "http://localhost:8000");
        assert_eq!(normalize_api_url("https://api.example.com//"), "https://api.example.com");
    }

    #[test]
    fn test_endpoint_url() {
        let settings = AppSettings {
            api_url: "http://localhost:8000".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.api_url("/predict"), "http://localhost:8000/predict");
        assert_eq!(join_endpoint("https://api.example.com/", "/health"), "https://api.example.com/health");
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("DEBUG"), Some(Level::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_update_settings() {
        update_settings(|s| s.toast_duration_ms = 1200);
        assert_eq!(get_settings().toast_duration_ms, 1200);
    }
}
