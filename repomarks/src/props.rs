use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::read_to_string;

#[derive(Error, Debug)]
pub enum PropsError {
    #[error("invalid JSON in --props")]
    Json(#[source] serde_json::Error),

    #[error("could not read props file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse props file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Free-form metadata handed to templates, kept in the order it was given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(IndexMap<String, Value>);

impl Props {
    pub fn from_json(json: &str) -> Result<Self, PropsError> {
        serde_json::from_str(json).map_err(PropsError::Json)
    }

    pub async fn from_file(path: &Path) -> Result<Self, PropsError> {
        let string = read_to_string(path)
            .await
            .map_err(|source| PropsError::Read {
                path: path.to_owned(),
                source,
            })?;
        serde_json::from_str(&string).map_err(|source| PropsError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `projectId` prop, naming the top folder of every template.
    pub fn project_id(&self) -> Option<&str> {
        self.get("projectId").and_then(Value::as_str)
    }
}
