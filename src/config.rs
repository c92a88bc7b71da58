use std::path::PathBuf;

use thiserror::Error;

use crate::env_provider::EnvProvider;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/finances.db?mode=rwc";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4173;
pub const DEFAULT_STATIC_DIR: &str = "dist";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Environment variable {0} has an invalid value: '{1}'")]
    InvalidVar(&'static str, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    ///
    /// Directory holding the built frontend bundle.
    /// Any non-API path is served from here, falling back to `index.html`.
    ///
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env(env_provider: &dyn EnvProvider) -> Result<Self> {
        let database_url = env_provider.get_var("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = env_provider.get_var("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match env_provider.get_var("PORT") {
            Some(port) => port.trim().parse::<u16>()
                .map_err(|_| Error::InvalidVar("PORT", port))?,
            None => DEFAULT_PORT,
        };
        let static_dir = env_provider.get_var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Config { database_url, host, port, static_dir })
    }

    ///
    /// File backing the database, if the URL points at an on-disk SQLite file.
    /// `None` for in-memory databases and non-SQLite URLs.
    ///
    pub fn sqlite_file_path(&self) -> Option<PathBuf> {
        let path = self.database_url.strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or_default();

        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }
}
