//! Path management for Saldo
//!
//! Resolves where the settings file and the record snapshots live.
//!
//! ## Path Resolution Order
//!
//! 1. `SALDO_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/saldo` on Linux, `%APPDATA%\saldo\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::SaldoError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SALDO_DATA_DIR";

/// Manages all paths used by Saldo
#[derive(Debug, Clone)]
pub struct SaldoPaths {
    /// Base directory for settings and snapshots
    base_dir: PathBuf,
}

impl SaldoPaths {
    /// Create a new SaldoPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, SaldoError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SaldoPaths with a custom base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Snapshot of `GET /api/gastos`
    pub fn expenses_file(&self) -> PathBuf {
        self.base_dir.join("gastos.json")
    }

    /// Snapshot of `GET /api/receitas`
    pub fn incomes_file(&self) -> PathBuf {
        self.base_dir.join("receitas.json")
    }

    /// Snapshot of `GET /api/metas`
    pub fn goals_file(&self) -> PathBuf {
        self.base_dir.join("metas.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SaldoError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SaldoError::Io(format!("Failed to create config directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, SaldoError> {
    ProjectDirs::from("", "", "saldo")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SaldoError::Config("Could not determine a home directory".into()))
}
