//! Decode boundary for fetched record collections.
//!
//! The app fetches each entity collection from the record store and hands the
//! combined JSON payload to [`parse_snapshot`]. Decode is tolerant per
//! element: a malformed record is skipped with a warn, so one bad row never
//! poisons a whole fetch. These two entry points are the only fallible code
//! in the crate; everything downstream of a [`Snapshot`] is total.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{Customer, Investment, Note, Project, Sale, Task};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Read(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One user's fetched collections, as of one render pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub investments: Vec<Investment>,
}

impl Snapshot {
    pub fn total_records(&self) -> usize {
        self.projects.len()
            + self.tasks.len()
            + self.sales.len()
            + self.customers.len()
            + self.notes.len()
            + self.investments.len()
    }
}

/// Tolerant decode of a fetched payload. Missing collections are empty;
/// malformed elements are skipped with a warn.
pub fn parse_snapshot(raw: &str) -> Result<Snapshot, SnapshotError> {
    let root: Value = serde_json::from_str(raw)?;
    Ok(Snapshot {
        projects: decode_collection(&root, "projects"),
        tasks: decode_collection(&root, "tasks"),
        sales: decode_collection(&root, "sales"),
        customers: decode_collection(&root, "customers"),
        notes: decode_collection(&root, "notes"),
        investments: decode_collection(&root, "investments"),
    })
}

/// Read and decode a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let raw = fs::read_to_string(path)?;
    parse_snapshot(&raw)
}

fn decode_collection<T: DeserializeOwned>(root: &Value, key: &str) -> Vec<T> {
    let Some(value) = root.get(key) else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        log::warn!("snapshot: \"{}\" is not an array, treating as empty", key);
        return Vec::new();
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!("snapshot: skipping {}[{}]: {}", key, index, err);
            }
        }
    }
    log::debug!("snapshot: decoded {} of {} {}", records.len(), items.len(), key);
    records
}
