use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to delete existing {path}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Removes a previously generated artifact. Returns whether one existed.
pub async fn remove_existing(path: &Path) -> Result<bool, OutputError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            info!("Successfully deleted existing {}", path.display());
            Ok(true)
        }
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(OutputError::Delete {
            path: path.to_owned(),
            source,
        }),
    }
}

/// Replaces whatever is at `path` with `contents`.
pub async fn write_output(path: &Path, contents: &str) -> Result<(), OutputError> {
    remove_existing(path).await?;
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| OutputError::Write {
            path: path.to_owned(),
            source,
        })?;
    info!("Wrote {}", path.display());
    Ok(())
}
