use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read query packs file {path}: {source}")]
    PacksFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse query packs file: {0}")]
    PacksFileParse(#[from] serde_yaml::Error),

    #[error("query pack validation failed: {0}")]
    Validation(String),

    #[error("unknown query pack: {0}")]
    UnknownQueryPack(String),
}

/// Errors raised by the on-disk [`crate::RecordCache`].
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cache entry {path} is not a valid record list: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}
