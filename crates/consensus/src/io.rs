//! JSON files in and out.
//!
//! Extract files hold a JSON array with one extract per classification.
//! Each element is either the extract itself or the request envelope the
//! extract arrived in, `{"data": <extract>}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Deserialize a whole JSON file, e.g. a parameter config.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let raw = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an array of extracts, unwrapping `{"data": ...}` envelopes.
pub fn load_extracts<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IoError> {
    let wrapped: Vec<Envelope<T>> = load_json(path)?;
    Ok(wrapped.into_iter().map(Envelope::into_inner).collect())
}

/// Parse extracts from an in-memory JSON string.
pub fn parse_extracts<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, IoError> {
    let wrapped: Vec<Envelope<T>> = serde_json::from_str(raw)?;
    Ok(wrapped.into_iter().map(Envelope::into_inner).collect())
}

/// Pretty-printed JSON with a trailing newline.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, IoError> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Write `value` as pretty-printed JSON to `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), IoError> {
    let out = to_json_string(value)?;
    fs::write(path, out).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}
