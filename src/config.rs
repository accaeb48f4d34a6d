//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::loader;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Alert CSV location
    pub data_file: PathBuf,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Static value for the "System Health" tile
    pub system_health: String,

    /// Read the dataset before accepting requests
    pub eager_load: bool,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| loader::default_data_path()),

            host: env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            system_health: env::var("SYSTEM_HEALTH")
                .unwrap_or_else(|_| "98.2%".to_string()),

            eager_load: env::var("EAGER_LOAD")
                .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: loader::default_data_path(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            system_health: "98.2%".to_string(),
            eager_load: true,
            environment: "development".to_string(),
        }
    }
}
