//! Dataset catalog: `*.txt` edge lists stored in a single directory.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

const DATASET_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid dataset name: {0:?}")]
    InvalidName(String),

    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sorted entry names (file stems). A missing directory lists as empty.
    pub async fn list(&self) -> Result<Vec<String>, CatalogError> {
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DATASET_EXTENSION) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();

        tracing::debug!(root = %self.root.display(), entries = names.len(), "listed datasets");
        Ok(names)
    }

    pub async fn read(&self, name: &str) -> Result<String, CatalogError> {
        let path = self.entry_path(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(CatalogError::NotFound(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf, CatalogError> {
        if !is_valid_name(name) {
            return Err(CatalogError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.{DATASET_EXTENSION}")))
    }
}

/// Names are single path components: no separators and no `..`.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.contains('\0')
}
