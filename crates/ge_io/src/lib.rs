//! crates/ge_io/src/lib.rs
//! Local-file I/O for the simulator.
//!
//! - `loader`        : candidate dataset, params and assignment scripts
//! - `canonical_json`: sorted-key compact JSON + atomic writes
//! - `hasher`        : SHA-256 over canonical bytes
//!
//! Offline only: anything that looks like `<scheme>://` is refused.

#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse or shape errors, with a JSON Pointer to the offending node.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Input parsed but violates a domain rule (bad token, duplicate district, …).
    #[error("invalid: {0}")]
    Invalid(String),

    /// Input exceeds the configured size cap.
    #[error("input too large: {path} ({size} bytes > {limit})")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("network paths are not allowed: {0}")]
    NonLocalPath(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

impl From<ge_core::CoreError> for IoError {
    fn from(e: ge_core::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

pub use canonical_json::{to_canonical_bytes, write_bytes_atomic, write_canonical_file};
pub use hasher::{sha256_canonical, sha256_hex};
pub use loader::{load_assignments, load_catalog, load_params, AssignmentStep};
