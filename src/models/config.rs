//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::client::http::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT};

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Session cookie signing key; at least 64 bytes.
    pub secret: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Ceiling applied to every remote call.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}
