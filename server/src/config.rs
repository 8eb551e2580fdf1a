//! Configuration management for the server.

use shiptrack_engine::CompanyProfile;
use std::env;
use std::path::PathBuf;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// JSON file holding all shipments
    pub data_file: PathBuf,
    /// Directory with a front-end to serve at `/`, if any
    pub static_dir: Option<PathBuf>,
    /// `pdftoppm` executable used for image receipts
    pub pdftoppm_bin: PathBuf,
    /// Resolution of image receipts
    pub raster_dpi: u32,
    /// Company block printed on receipts
    pub company: CompanyProfile,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let data_file = var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/shipments.json"));

        let static_dir = var("STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let pdftoppm_bin = var("PDFTOPPM_BIN")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("pdftoppm"));

        let raster_dpi = var("RASTER_DPI")
            .unwrap_or_else(|| "150".to_string())
            .parse::<u32>()
            .ok()
            .filter(|dpi| *dpi > 0)
            .ok_or(ConfigError::InvalidDpi)?;

        let defaults = CompanyProfile::default();
        let company = CompanyProfile {
            name: var("COMPANY_NAME").unwrap_or(defaults.name),
            address: var("COMPANY_ADDRESS").unwrap_or(defaults.address),
            contact: var("COMPANY_CONTACT").unwrap_or(defaults.contact),
        };

        Ok(Self {
            host,
            port,
            data_file,
            static_dir,
            pdftoppm_bin,
            raster_dpi,
            company,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,

    #[error("Invalid RASTER_DPI value")]
    InvalidDpi,
}
