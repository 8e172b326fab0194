//! Port traits: the hexagonal boundary between the risk core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MoldRiskService (domain)
//! ```
//!
//! Driven adapters (state storage, config storage, event sinks) implement
//! these traits.  The [`MoldRiskService`](super::service::MoldRiskService)
//! consumes them via generics, so the core never performs I/O itself.

use crate::config::RiskConfig;
use crate::error::{ConfigError, StorageError};

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ state store)
// ───────────────────────────────────────────────────────────────

/// Namespaced key-value byte store for persisted risk state.
///
/// Writes MUST be atomic per key: a reader sees either the previous record
/// or the new one, never a partial write.
pub trait StoragePort {
    /// Read a value into `buf`.  Returns the number of bytes written.
    /// [`StorageError::BufferTooSmall`] if the value does not fit.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`RiskConfig`].
///
/// Implementations MUST call [`RiskConfig::validate`] before persisting and
/// reject invalid values with [`ConfigError::ValidationFailed`].
pub trait ConfigPort {
    /// Load configuration.  [`ConfigError::NotFound`] if none is stored.
    fn load(&self) -> Result<RiskConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &RiskConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / alerting)
// ───────────────────────────────────────────────────────────────

/// The service emits [`RiskEvent`](super::events::RiskEvent)s through this
/// port.  Adapters decide where they go (log, dashboard, alerting).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::RiskEvent);
}
