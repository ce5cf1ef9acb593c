//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::domain::entities::DEFAULT_UPLOAD_FOLDER;
use crate::infrastructure::cloudinary::{DEFAULT_API_BASE, DEFAULT_CDN_HOST, SignatureAlgorithm};
use crate::infrastructure::handoff::DEFAULT_STOREFRONT_API;

pub(crate) const APP_NAME: &str = "retag";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "retag";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset and no data dir exists.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory holding wishlist slots and the log file.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Cloudinary delivery and upload settings. Credentials come from the
    /// environment, never from this file.
    #[serde(default)]
    pub cloudinary: CloudinarySettings,

    /// Storefront endpoints.
    #[serde(default)]
    pub storefront: StorefrontSettings,
}

/// Non-secret Cloudinary settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinarySettings {
    /// Account name used when `CLOUDINARY_CLOUD_NAME` is unset.
    #[serde(default)]
    pub cloud_name: Option<String>,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_cdn_host")]
    pub cdn_host: String,

    /// Folder for uploads that do not name one.
    #[serde(default = "default_upload_folder")]
    pub upload_folder: String,

    /// Digest the account uses for signed API requests.
    #[serde(default)]
    pub signature_algorithm: SignatureAlgorithm,
}

impl Default for CloudinarySettings {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_base: default_api_base(),
            cdn_host: default_cdn_host(),
            upload_folder: default_upload_folder(),
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }
}

/// Storefront endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontSettings {
    /// Base of the storefront REST API.
    #[serde(default = "default_storefront_api")]
    pub api_url: String,

    /// Public storefront URL that handoff links point at.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            api_url: default_storefront_api(),
            base_url: None,
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_cdn_host() -> String {
    DEFAULT_CDN_HOST.to_string()
}

fn default_upload_folder() -> String {
    DEFAULT_UPLOAD_FOLDER.to_string()
}

fn default_storefront_api() -> String {
    DEFAULT_STOREFRONT_API.to_string()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(data_dir) = &args.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
        if let Some(cloud_name) = &args.cloud_name {
            self.cloudinary.cloud_name = Some(cloud_name.clone());
        }
        if let Some(api_url) = &args.api_url {
            self.storefront.api_url.clone_from(api_url);
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default data directory.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective data directory.
    #[must_use]
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(Self::default_data_dir)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| self.effective_data_dir().map(|dir| dir.join("retag.log")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            data_dir: None,
            cloudinary: CloudinarySettings::default(),
            storefront: StorefrontSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [cloudinary]
            cloud_name = "retag-demo"
            upload_folder = "retag/drafts"
            signature_algorithm = "sha256"

            [storefront]
            base_url = "https://retag.example"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.cloudinary.cloud_name.as_deref(), Some("retag-demo"));
        assert_eq!(config.cloudinary.upload_folder, "retag/drafts");
        assert_eq!(
            config.cloudinary.signature_algorithm,
            SignatureAlgorithm::Sha256
        );
        assert_eq!(config.cloudinary.cdn_host, DEFAULT_CDN_HOST);
        assert_eq!(config.storefront.api_url, DEFAULT_STOREFRONT_API);
        assert_eq!(
            config.storefront.base_url.as_deref(),
            Some("https://retag.example")
        );
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.cloudinary.cloud_name.is_none());
        assert_eq!(config.cloudinary.upload_folder, DEFAULT_UPLOAD_FOLDER);
        assert_eq!(config.cloudinary.api_base, DEFAULT_API_BASE);
        assert_eq!(config.cloudinary.signature_algorithm, SignatureAlgorithm::Sha1);
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config: AppConfig = toml::from_str(
            r#"
            log_level = "warn"
            [cloudinary]
            cloud_name = "from-file"
            "#,
        )
        .unwrap();

        let args = CliArgs::parse_from([
            "retag",
            "--log-level",
            "trace",
            "--cloud-name",
            "from-cli",
            "--data-dir",
            "/tmp/retag",
            "extract",
            "https://res.cloudinary.com/a/image/upload/v1/x.jpg",
        ]);
        config.merge_with_args(&args);

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.cloudinary.cloud_name.as_deref(), Some("from-cli"));
        assert_eq!(
            config.effective_log_path(),
            Some(PathBuf::from("/tmp/retag/retag.log"))
        );
    }
}
