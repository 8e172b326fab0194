//! Mold-risk estimation for indoor climate sensors.
//!
//! Turns a stream of temperature / relative-humidity readings into a
//! running mold-growth risk score using the IPI days-to-mold methodology:
//!
//! ```text
//! (T, RH) ──▶ DTM (table + bilinear) ──▶ MGR = 1/DTM ──▶ GoRP = MGR·h/24
//!                                                           │
//!                MoldRiskState ◀── accumulate / pause / 24 h reset
//! ```
//!
//! The core modules are pure and synchronous.  The [`app`] layer and the
//! [`adapters`] wrap them with state persistence and event reporting.

#![deny(unused_must_use)]

pub mod config;
pub mod dtm;
pub mod growth;
pub mod mold_factor;
pub mod reading;
pub mod risk;

pub mod adapters;
pub mod app;

mod error;

pub use error::{ConfigError, Error, KeyError, ReprError, Result, StorageError, TableError};
