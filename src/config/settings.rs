//! User settings for Saldo
//!
//! Manages display preferences and the timezone used to place timestamps
//! into calendar months.

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::paths::SaldoPaths;
use crate::error::SaldoError;

/// Timezone used when deciding which month a timestamp belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneSetting {
    /// The evaluating machine's local timezone (default)
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

/// User settings for Saldo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Bucket name for records without a category
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Earliest year offered by the period selector
    #[serde(default = "default_first_year")]
    pub first_year: i32,

    /// Timezone for period filtering
    #[serde(default)]
    pub timezone: TimezoneSetting,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_category() -> String {
    "Sem Categoria".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_first_year() -> i32 {
    2020
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_category: default_category(),
            date_format: default_date_format(),
            first_year: default_first_year(),
            timezone: TimezoneSetting::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SaldoPaths) -> Result<Self, SaldoError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SaldoError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SaldoError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values that would fail later while rendering
    ///
    /// Dates are rendered as naive date-times, so `date_format` must parse
    /// and must not ask for an offset or timezone name.
    pub fn validate(&self) -> Result<(), SaldoError> {
        let parses = !StrftimeItems::new(&self.date_format)
            .any(|item| matches!(item, Item::Error));
        let sample = NaiveDate::MIN.and_time(NaiveTime::MIN);
        let mut rendered = String::new();

        if !parses || write!(rendered, "{}", sample.format(&self.date_format)).is_err() {
            return Err(SaldoError::Config(format!(
                "Invalid date_format '{}' in settings file",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SaldoPaths) -> Result<(), SaldoError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SaldoError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| SaldoError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
