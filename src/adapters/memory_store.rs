//! In-process storage adapter.
//!
//! Implements both [`StoragePort`] and [`ConfigPort`] on a shared
//! `HashMap`.  Used by hosts that keep state in memory and by tests.

use std::cell::RefCell;
use std::collections::HashMap;

use log::{debug, info};

use crate::app::ports::{ConfigPort, StoragePort};
use crate::config::RiskConfig;
use crate::error::{ConfigError, StorageError};

const CONFIG_NAMESPACE: &str = "moldrisk_cfg";
const CONFIG_KEY: &str = "riskcfg";

#[derive(Debug, Default)]
pub struct MemoryStore {
    store: RefCell<HashMap<String, Vec<u8>>>,
    /// Maximum number of keys; `None` = unbounded.
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses new keys once `capacity` keys exist.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: RefCell::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

    /// Number of stored keys (state records and config).
    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }
}

impl StoragePort for MemoryStore {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let store = self.store.borrow();
        let value = store
            .get(&Self::composite_key(namespace, key))
            .ok_or(StorageError::NotFound)?;
        if value.len() > buf.len() {
            return Err(StorageError::BufferTooSmall);
        }
        buf[..value.len()].copy_from_slice(value);
        Ok(value.len())
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let composite = Self::composite_key(namespace, key);
        let store = self.store.get_mut();
        if let Some(cap) = self.capacity {
            if !store.contains_key(&composite) && store.len() >= cap {
                return Err(StorageError::Full);
            }
        }
        debug!("MemoryStore: write {} ({} bytes)", composite, data.len());
        store.insert(composite, data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store
            .get_mut()
            .remove(&Self::composite_key(namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store
            .borrow()
            .contains_key(&Self::composite_key(namespace, key))
    }
}

impl ConfigPort for MemoryStore {
    fn load(&self) -> Result<RiskConfig, ConfigError> {
        let key = Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY);
        let store = self.store.borrow();
        let bytes = store.get(&key).ok_or(ConfigError::NotFound)?;
        let cfg: RiskConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        info!("MemoryStore: loaded config");
        Ok(cfg)
    }

    fn save(&self, config: &RiskConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.store
            .borrow_mut()
            .insert(Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY), bytes);
        info!("MemoryStore: config saved");
        Ok(())
    }
}
