// Loading article collections from disk

use crate::error::{Result, ScanError};
use crate::result::Collection;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a collection file, keeping at most `limit` articles (0 keeps all).
pub fn load_collection(path: &Path, limit: usize) -> Result<Collection> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut collection = parse_collection(&content, limit)?;
    if collection.user.username.is_empty()
        && let Some(stem) = path.file_stem()
    {
        collection.user.username = stem.to_string_lossy().to_string();
    }

    info!(
        "Loaded {} articles for '{}' from {}",
        collection.articles.len(),
        collection.user.username,
        path.display()
    );
    Ok(collection)
}

pub fn parse_collection(content: &str, limit: usize) -> Result<Collection> {
    let mut collection: Collection = serde_json::from_str(content)?;

    if limit > 0 {
        collection.articles.truncate(limit);
    }
    if collection.articles.is_empty() {
        return Err(ScanError::Empty);
    }

    Ok(collection)
}
