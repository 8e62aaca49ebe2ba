//! Configuration management for the checkout client
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use shopsmart_common::Coordinate;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (e.g. "http://localhost:4000/api")
    pub api_url: String,

    /// Where the session token is persisted between runs
    pub session_file: PathBuf,

    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,

    /// Upper bound on a geolocation query in seconds
    pub geo_timeout_secs: u64,

    /// Position reported by the platform location source, if any
    pub location: Option<Coordinate>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            api_url: env::var("SHOPSMART_API_URL")
                .unwrap_or_else(|_| "http://localhost:4000/api".to_string()),

            session_file: env::var("SHOPSMART_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),

            request_timeout_secs: env::var("SHOPSMART_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("Invalid SHOPSMART_REQUEST_TIMEOUT_SECS")?,

            geo_timeout_secs: env::var("SHOPSMART_GEO_TIMEOUT_SECS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .context("Invalid SHOPSMART_GEO_TIMEOUT_SECS")?,

            location: location_from_env()?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if url.is_empty() {
            anyhow::bail!("SHOPSMART_API_URL must not be empty");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("SHOPSMART_API_URL must be an http(s) URL");
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("SHOPSMART_REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        if self.geo_timeout_secs == 0 {
            anyhow::bail!("SHOPSMART_GEO_TIMEOUT_SECS must be greater than 0");
        }

        if let Some(c) = self.location {
            if !(-90.0..=90.0).contains(&c.lat) {
                anyhow::bail!("SHOPSMART_LATITUDE must be within [-90, 90]");
            }
            if !(-180.0..=180.0).contains(&c.lng) {
                anyhow::bail!("SHOPSMART_LONGITUDE must be within [-180, 180]");
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn geo_timeout(&self) -> Duration {
        Duration::from_secs(self.geo_timeout_secs)
    }
}

fn default_session_file() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".shopsmart").join("session.json"),
        None => PathBuf::from(".shopsmart-session.json"),
    }
}

fn location_from_env() -> Result<Option<Coordinate>> {
    let lat = env::var("SHOPSMART_LATITUDE").ok();
    let lng = env::var("SHOPSMART_LONGITUDE").ok();

    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let lat: f64 = lat.trim().parse().context("Invalid SHOPSMART_LATITUDE")?;
            let lng: f64 = lng.trim().parse().context("Invalid SHOPSMART_LONGITUDE")?;
            Ok(Some(Coordinate::new(lat, lng)))
        }
        _ => anyhow::bail!("SHOPSMART_LATITUDE and SHOPSMART_LONGITUDE must be set together"),
    }
}
