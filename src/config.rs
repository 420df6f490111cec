//! Configuration loading
//!
//! Every setting resolves through the same priority ladder:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`SPINLENS_*`)
//! 3. TOML config file (`--config <path>`, else `spinlens.toml` in the
//!    working directory, else the user config directory)
//! 4. Compiled default

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_TAXONOMY_PATH: &str = "taxonomy_kb.json";

/// Command-line arguments; every flag also reads its environment variable.
#[derive(Debug, Default, Parser)]
#[command(name = "spinlens", version, about = "Persuasion analysis service")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "SPINLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "SPINLENS_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "SPINLENS_PORT")]
    pub port: Option<u16>,

    /// Generative model identifier
    #[arg(long, env = "SPINLENS_MODEL")]
    pub model: Option<String>,

    /// Base URL of the generative service API
    #[arg(long, env = "SPINLENS_GEMINI_BASE_URL")]
    pub gemini_base_url: Option<String>,

    /// Remote request timeout in seconds
    #[arg(long, env = "SPINLENS_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Path to the taxonomy knowledge base
    #[arg(long, env = "SPINLENS_TAXONOMY_PATH")]
    pub taxonomy_path: Option<PathBuf>,

    /// Allowed CORS origin (repeatable); none means permissive CORS
    #[arg(
        long = "allowed-origin",
        env = "SPINLENS_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,

    /// Directory of static frontend assets to serve
    #[arg(long, env = "SPINLENS_STATIC_ASSETS")]
    pub static_assets: Option<PathBuf>,
}

/// TOML file tier; every field optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
    pub gemini_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub taxonomy_path: Option<PathBuf>,
    pub allowed_origins: Option<Vec<String>>,
    pub static_assets: Option<PathBuf>,
}

/// Fully resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub gemini_base_url: String,
    pub request_timeout_secs: u64,
    pub taxonomy_path: PathBuf,
    /// Empty means permissive CORS
    pub allowed_origins: Vec<String>,
    pub static_assets: Option<PathBuf>,
}

impl Config {
    /// Resolve the configuration from CLI/env (already merged by clap), the
    /// TOML file tier, and compiled defaults.
    pub fn resolve(cli: Cli) -> Self {
        let file = load_file_config(cli.config.as_deref());

        let allowed_origins = if !cli.allowed_origins.is_empty() {
            cli.allowed_origins
        } else {
            file.allowed_origins.unwrap_or_default()
        };

        Self {
            host: cli
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file.port).unwrap_or(DEFAULT_PORT),
            model: cli
                .model
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: cli
                .gemini_base_url
                .or(file.gemini_base_url)
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            request_timeout_secs: cli
                .request_timeout_secs
                .or(file.request_timeout_secs)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            taxonomy_path: cli
                .taxonomy_path
                .or(file.taxonomy_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TAXONOMY_PATH)),
            allowed_origins,
            static_assets: cli.static_assets.or(file.static_assets),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load the TOML tier from an explicit path or the first default location
/// that exists. Malformed or unreadable files degrade to the empty tier.
fn load_file_config(explicit: Option<&Path>) -> FileConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return FileConfig::default(),
        },
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            if explicit.is_some() {
                tracing::warn!(path = %path.display(), error = %e, "config file not readable");
            }
            return FileConfig::default();
        }
    };

    match toml::from_str::<FileConfig>(&raw) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config file malformed, ignoring");
            FileConfig::default()
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("spinlens.toml");
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("spinlens").join("config.toml"))
        .filter(|path| path.exists())
}
