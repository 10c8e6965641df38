//! JSON snapshot loading
//!
//! Reads the record arrays returned by the backend (`GET /api/gastos`,
//! `/api/receitas`, `/api/metas`) from files in the data directory. A missing
//! file is an empty list. A record that can't be read at all (for instance,
//! one without an id) is skipped with a warning so the rest still load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::paths::SaldoPaths;
use crate::error::SaldoError;
use crate::models::{Expense, Goal, Income};

/// Read a JSON array of records from `path`
///
/// Returns an empty list if the file doesn't exist. Fails only when the file
/// can't be opened or isn't a JSON array.
pub fn read_records<T, P>(path: P) -> Result<Vec<T>, SaldoError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let values = read_values(path)?;

    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect();

    debug!(path = %path.display(), loaded = records.len(), total, "loaded snapshot");
    Ok(records)
}

fn read_values(path: &Path) -> Result<Vec<Value>, SaldoError> {
    if !path.exists() {
        debug!(path = %path.display(), "snapshot file missing, treating as empty");
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| SaldoError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| SaldoError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Id the next record appended to `path` should get: one past the largest
pub fn next_id<P: AsRef<Path>>(path: P) -> Result<i64, SaldoError> {
    let values = read_values(path.as_ref())?;
    let max = values
        .iter()
        .filter_map(|value| value.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0);
    Ok(max + 1)
}

/// Append `record` to the array in `path`, creating the file if needed
///
/// Existing elements are written back exactly as read, including the ones
/// `read_records` would skip.
pub fn append_record<T, P>(path: P, record: &T) -> Result<(), SaldoError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut values = read_values(path)?;
    values.push(serde_json::to_value(record)?);

    // Write next to the target, then rename over it
    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path)
        .map_err(|e| SaldoError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &values)?;
    writer
        .flush()
        .map_err(|e| SaldoError::Io(format!("Failed to flush {}: {}", temp_path.display(), e)))?;

    std::fs::rename(&temp_path, path)
        .map_err(|e| SaldoError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    debug!(path = %path.display(), total = values.len(), "appended record");
    Ok(())
}

/// Everything the engine reads, loaded once per invocation
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub goals: Vec<Goal>,
}

impl Snapshot {
    /// Load all three record files from the data directory
    pub fn load(paths: &SaldoPaths) -> Result<Self, SaldoError> {
        Ok(Self {
            expenses: read_records(paths.expenses_file())?,
            incomes: read_records(paths.incomes_file())?,
            goals: read_records(paths.goals_file())?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.incomes.is_empty() && self.goals.is_empty()
    }
}
