use crate::application::services::attachment_policy::DEFAULT_MAX_IMAGE_BYTES;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub max_image_bytes: usize,
    pub session_file: PathBuf,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let api_base_url = env::var("PETZONE_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_base_url));
        }

        let request_timeout_secs = env::var("PETZONE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let max_image_bytes = match env::var("PETZONE_MAX_IMAGE_BYTES") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidMaxImageBytes)?,
            Err(_) => DEFAULT_MAX_IMAGE_BYTES,
        };

        let session_file = env::var("PETZONE_SESSION_FILE")
            .unwrap_or_else(|_| ".petzone_session.json".to_string())
            .into();

        let email = env::var("PETZONE_EMAIL").ok();
        let password = env::var("PETZONE_PASSWORD").ok();

        Ok(Config {
            api_base_url,
            request_timeout_secs,
            max_image_bytes,
            session_file,
            email,
            password,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PETZONE_API_URL must be an http(s) URL, got '{0}'")]
    InvalidApiUrl(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid maximum image size")]
    InvalidMaxImageBytes,
}
