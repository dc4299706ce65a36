//! Keyed on-disk store for collected record lists.
//!
//! Each key maps to one pretty-printed JSON file under the cache directory.
//! The collector never touches this; callers wrap a collection run with
//! [`RecordCache::load`] and [`RecordCache::save`].

use std::fmt::Display;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::CacheError;
use crate::records::CompanyRecord;

/// Longest readable prefix kept in a cache file name before the fingerprint.
const MAX_READABLE_KEY_LEN: usize = 96;

/// Builds a stable cache key from the parameters of a collection run.
///
/// The key is a readable prefix (`fr-pack-n50-...`) followed by a SHA-256
/// fingerprint of the unsanitized parts, so two parameter sets that
/// sanitize or truncate to the same prefix still get distinct files.
#[derive(Debug, Clone, Default)]
pub struct CacheKey {
    parts: Vec<String>,
}

impl CacheKey {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            parts: vec![prefix.into()],
        }
    }

    #[must_use]
    pub fn part(mut self, label: &str, value: impl Display) -> Self {
        self.parts.push(format!("{label}{value}"));
        self
    }

    /// Like [`CacheKey::part`], recording `none` for an absent value.
    #[must_use]
    pub fn opt_part<T: Display>(self, label: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.part(label, v),
            None => self.part(label, "none"),
        }
    }

    #[must_use]
    pub fn build(&self) -> String {
        let raw = self.parts.join("-");
        let digest = Sha256::digest(raw.as_bytes());
        let fingerprint: String = digest
            .iter()
            .take(8)
            .map(|b| format!("{b:02x}"))
            .collect();

        let mut readable = sanitize_key(&raw);
        if readable.len() > MAX_READABLE_KEY_LEN {
            readable.truncate(MAX_READABLE_KEY_LEN);
        }
        format!("{readable}-{fingerprint}")
    }
}

/// Drops every character that is not ASCII alphanumeric, `-`, `_` or `.`.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

#[derive(Debug, Clone)]
pub struct RecordCache {
    dir: PathBuf,
}

impl RecordCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`. The key is sanitized, so callers may pass raw text.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Reads the records stored under `key`, or `None` on a cache miss.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the file exists but cannot be read, or
    /// [`CacheError::Json`] if it does not hold a record list.
    pub fn load(&self, key: &str) -> Result<Option<Vec<CompanyRecord>>, CacheError> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CacheError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let records = serde_json::from_str::<Vec<CompanyRecord>>(&content).map_err(|e| {
            CacheError::Json {
                path: path.display().to_string(),
                source: e,
            }
        })?;

        tracing::debug!(path = %path.display(), count = records.len(), "cache hit");
        Ok(Some(records))
    }

    /// Writes `records` under `key`, creating the cache directory if needed.
    ///
    /// The file is written next to its final path and renamed into place so
    /// readers never observe a half-written entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] on any filesystem failure.
    pub fn save(&self, key: &str, records: &[CompanyRecord]) -> Result<(), CacheError> {
        let io_err = |path: &Path| {
            let path = path.display().to_string();
            move |source| CacheError::Io { path, source }
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        let path = self.path_for(key);
        let payload = serde_json::to_string_pretty(records).map_err(|e| CacheError::Json {
            path: path.display().to_string(),
            source: e,
        })?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, payload).map_err(io_err(&tmp))?;
        std::fs::rename(&tmp, &path).map_err(io_err(&path))?;

        tracing::debug!(path = %path.display(), count = records.len(), "cache entry written");
        Ok(())
    }
}
