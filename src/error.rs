//! Unified error types for the mold-risk crate.
//!
//! The pure core (`dtm`, `growth`, `risk::accumulator`) never fails: out of
//! range inputs map to `None` or `0.0`.  Errors only appear at the edges:
//! decoding a persisted state record, validating a custom DTM table or a
//! configuration, building a storage key, and storage I/O.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A persisted state record could not be decoded.
    Representation(ReprError),
    /// The storage backend failed.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A custom DTM table failed validation.
    Table(TableError),
    /// A room/sensor key is empty or too long.
    Key(KeyError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Representation(e) => write!(f, "state record: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Table(e) => write!(f, "dtm table: {e}"),
            Self::Key(e) => write!(f, "key: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Representation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ReprError {
    /// `current_risk_score` is NaN or infinite.
    NonFiniteScore,
    /// A timestamp field is not ISO-8601.  Carries the field name.
    InvalidTimestamp(&'static str),
    /// The byte blob is not a valid JSON / postcard record.
    Malformed,
}

impl fmt::Display for ReprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteScore => write!(f, "risk score is not finite"),
            Self::InvalidTimestamp(field) => write!(f, "{field} is not an ISO-8601 timestamp"),
            Self::Malformed => write!(f, "malformed record"),
        }
    }
}

impl From<ReprError> for Error {
    fn from(e: ReprError) -> Self {
        Self::Representation(e)
    }
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

/// Errors from [`StoragePort`](crate::app::ports::StoragePort) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// The backend is full.
    Full,
    /// The caller's buffer is smaller than the stored value.
    BufferTooSmall,
    /// Generic I/O error.
    IoError,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::BufferTooSmall => write!(f, "read buffer too small"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors from [`ConfigPort`](crate::app::ports::ConfigPort) operations and
/// [`RiskConfig::validate`](crate::config::RiskConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Table errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// An axis has no points.
    EmptyAxis,
    /// Axis points are not finite and strictly ascending.
    UnsortedAxis,
    /// A cell holds a non-finite or non-positive day count.
    InvalidCell { temp_idx: usize, rh_idx: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAxis => write!(f, "axis has no grid points"),
            Self::UnsortedAxis => write!(f, "axis must be finite and strictly ascending"),
            Self::InvalidCell { temp_idx, rh_idx } => {
                write!(f, "cell [{temp_idx}][{rh_idx}] must be a positive day count")
            }
        }
    }
}

impl From<TableError> for Error {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

// ---------------------------------------------------------------------------
// Key errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "key is empty"),
            Self::TooLong { max } => write!(f, "key exceeds {max} bytes"),
        }
    }
}

impl From<KeyError> for Error {
    fn from(e: KeyError) -> Self {
        Self::Key(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
