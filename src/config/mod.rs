//! Configuration module for Saldo
//!
//! This module provides configuration management including:
//! - Platform path resolution for settings and snapshots
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SaldoPaths;
pub use settings::{Settings, TimezoneSetting};
