//! Recording adapters for integration tests.
//!
//! Capture every emitted event and every storage call so tests can assert
//! on the full history.

use moldrisk::StorageError;
use moldrisk::app::events::RiskEvent;
use moldrisk::app::ports::{EventSink, StoragePort};
use moldrisk::adapters::memory_store::MemoryStore;

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<RiskEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn count(&self, pred: impl Fn(&RiskEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &RiskEvent) {
        self.events.push(event.clone());
    }
}

// ── FlakyStore ────────────────────────────────────────────────

/// Wraps [`MemoryStore`] and fails writes on demand.
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_writes: bool,
    pub writes: usize,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_writes: false,
            writes: 0,
        }
    }
}

impl StoragePort for FlakyStore {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        self.inner.read(namespace, key, buf)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        self.writes += 1;
        self.inner.write(namespace, key, data)
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.inner.delete(namespace, key)
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.inner.exists(namespace, key)
    }
}
