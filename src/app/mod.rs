//! Application layer: orchestration around the pure risk core.
//!
//! The core ([`dtm`](crate::dtm), [`growth`](crate::growth),
//! [`risk`](crate::risk)) never performs I/O.  This layer loads and
//! persists per-room state and reports results, with every external
//! interaction going through the **port traits** in [`ports`].

pub mod commands;
pub mod events;
pub mod key;
pub mod ports;
pub mod service;
