//! Configuration for the sheetmerge daemon
//!
//! Settings come from CLI flags, environment variables and an optional TOML
//! file, in that order of precedence, falling back to built-in defaults.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:5000"
//! upload_dir = "/var/lib/sheetmerge/uploads"
//! max_upload_bytes = 10485760
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use sheetmerge_api::DEFAULT_MAX_UPLOAD_BYTES;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "sheetmerged")]
#[command(author, version, about = "Tabular upload and merge server")]
pub struct Cli {
    /// Address to listen on
    #[arg(short, long, env = "SHEETMERGE_BIND")]
    pub bind: Option<SocketAddr>,

    /// Directory that stores uploaded files
    #[arg(short, long, env = "SHEETMERGE_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Maximum upload request size in bytes
    #[arg(long, env = "SHEETMERGE_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<usize>,

    /// TOML configuration file
    #[arg(short, long, env = "SHEETMERGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// `[server]` table of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default)]
    pub bind: Option<SocketAddr>,
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,
}

/// Top-level TOML file layout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }
}

/// Fully resolved server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Resolve settings from parsed arguments, loading the config file if given
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading config file");
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };
        Self::resolve(cli, &file)
    }

    /// Merge CLI/env values over file values over defaults
    pub fn resolve(cli: &Cli, file: &FileConfig) -> anyhow::Result<Self> {
        let bind = match cli.bind.or(file.server.bind) {
            Some(addr) => addr,
            None => DEFAULT_BIND
                .parse()
                .context("Invalid default bind address")?,
        };

        let upload_dir = cli
            .upload_dir
            .clone()
            .or_else(|| file.server.upload_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR));

        let max_upload_bytes = cli
            .max_upload_bytes
            .or(file.server.max_upload_bytes)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Ok(Self {
            bind,
            upload_dir,
            max_upload_bytes,
        })
    }
}
