use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animation::Easing;

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "COMPLYVIZ_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (credentials, log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Backend connection settings shared by every API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the compliance backend, including any path prefix
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Defaults for scroll-triggered widget animations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Duration of one value animation in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Per-item stagger for list-like widgets in milliseconds
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
    /// Easing curve
    #[serde(default)]
    pub easing: Easing,
    /// Fraction of a widget that must be on screen before it animates (0.0-1.0)
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Rows added around the viewport when testing visibility (negative shrinks it)
    #[serde(default)]
    pub root_margin: i32,
    /// Frame rate while any animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            stagger_ms: default_stagger_ms(),
            easing: Easing::default(),
            visibility_threshold: default_visibility_threshold(),
            root_margin: 0,
            animation_fps: default_animation_fps(),
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    /// Frame interval derived from `animation_fps`
    pub fn frame_interval(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / u64::from(self.animation_fps))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Theme name (e.g., "gruvbox-dark", "nord")
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// Dashboard page scrolling
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: default_theme_name(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Smooth scrolling of the dashboard page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration_ms")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
    /// Rows moved per line-scroll key press, animated or not
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: true,
            animation_duration_ms: default_scroll_duration_ms(),
            easing: Easing::default(),
            scroll_lines: default_scroll_lines(),
        }
    }
}

impl ScrollConfig {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("complyviz")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_duration_ms() -> u64 {
    1500
}

fn default_stagger_ms() -> u64 {
    150
}

fn default_visibility_threshold() -> f64 {
    0.3
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_scroll_duration_ms() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    3
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::info!(base_url = %url, "API base URL overridden from environment");
                config.api.base_url = url;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Reject values the animation core or the API client cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let threshold = self.animation.visibility_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(crate::Error::Config(format!(
                "animation.visibility_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| crate::Error::Config(format!("Invalid api.base_url: {}", e)))?;
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/complyviz/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("complyviz")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// File holding the persisted session token
    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir().join("credentials.json")
    }

    /// Log file used while the dashboard owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("complyviz.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.animation.duration_ms, 1500);
        assert_eq!(config.animation.stagger_ms, 150);
        assert_eq!(config.animation.easing, Easing::CubicOut);
        assert_eq!(config.animation.animation_fps, 60);
        assert_eq!(config.ui.theme, "gruvbox-dark");
        assert!(config.ui.scroll.is_smooth());
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://compliance.example.com/api"

            [animation]
            easing = "quartic-out"
            visibility_threshold = 0.5
            root_margin = -2
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://compliance.example.com/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.animation.easing, Easing::QuarticOut);
        assert!((config.animation.visibility_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.animation.root_margin, -2);
        assert_eq!(config.animation.duration(), Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_threshold_out_of_range() {
        let mut config = AppConfig::default();
        config.animation.visibility_threshold = 1.5;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let mut config = AppConfig::default();
        config.animation.stagger_ms = 90;
        config.ui.scroll.smooth_enabled = false;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.animation.stagger_ms, 90);
        assert!(!parsed.ui.scroll.is_smooth());
    }

    #[test]
    fn test_frame_interval() {
        let mut animation = AnimationConfig::default();
        assert_eq!(animation.frame_interval(), Duration::from_millis(16));
        animation.animation_fps = 0;
        assert_eq!(animation.frame_interval(), Duration::from_millis(16));
        animation.animation_fps = 30;
        assert_eq!(animation.frame_interval(), Duration::from_millis(33));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("complyviz-missing-config-test.toml");
        let _ = std::fs::remove_file(&path);
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
    }
}
