pub mod answer;
pub mod auth;
pub mod org;
pub mod questions;
pub mod run;
pub mod trace;

use std::sync::Arc;

use anyhow::Result;
use complyviz_core::api::{ApiClient, FileCredentials};
use complyviz_core::AppConfig;

/// API client backed by the on-disk session file
pub fn api_client(config: &AppConfig) -> Result<ApiClient> {
    let credentials = Arc::new(FileCredentials::new(config.credentials_path()));
    Ok(ApiClient::new(&config.api, credentials)?)
}
