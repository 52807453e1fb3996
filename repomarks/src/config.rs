use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::read_to_string;

use crate::props::Props;

pub const CONFIG_FILE_NAME: &str = "repomarks.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found at: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Defaults read from `repomarks.toml`. Command line flags override them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub project_id: Option<String>,
    #[serde(default)]
    pub templates: Vec<String>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub props: Props,
}

impl Config {
    /// Loads a config the user asked for by path. It must exist.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = Self::resolve_path(path);
        match Self::read(&path).await? {
            Some(config) => Ok(config),
            None => Err(ConfigError::NotFound(path)),
        }
    }

    /// Loads `repomarks.toml` from `dir` if there is one.
    pub async fn load_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        Ok(Self::read(&path).await?.unwrap_or_default())
    }

    fn resolve_path(path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path.to_owned()
        }
    }

    async fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let string = match read_to_string(path).await {
            Ok(string) => string,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        let config = toml::from_str(&string).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        Ok(Some(config))
    }
}
