pub mod animation;
pub mod api;
pub mod config;
pub mod error;

pub use config::{AnimationConfig, ApiConfig, AppConfig, ScrollConfig};
pub use error::{Error, Result};
