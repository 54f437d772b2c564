//! Saving and loading documents through an opaque record store.
//!
//! A store holds one flat list of records, each a type tag plus the shape's
//! serialized schema node. `replace_all` swaps the whole list atomically: a
//! failed save must leave the previous contents readable.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::CommandHistory;
use crate::document::Document;
use crate::schema;

/// One persisted top-level shape. `json_data` is the serialized schema node;
/// `shape_type` duplicates its type tag for inspection without parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub shape_type: String,
    pub json_data: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Backend-agnostic record storage. Implementations must make `replace_all`
/// all-or-nothing with respect to previously stored records.
pub trait ShapeStore {
    fn load_all(&self) -> Result<Vec<ShapeRecord>, StoreError>;
    fn replace_all(&mut self, records: &[ShapeRecord]) -> Result<(), StoreError>;
}

/// Serializes every top-level shape in document order and replaces the
/// store's contents with the result.
pub fn save_document(document: &Document, store: &mut dyn ShapeStore) -> Result<(), StoreError> {
    let records: Vec<ShapeRecord> = document
        .shapes()
        .iter()
        .map(|shape| ShapeRecord {
            shape_type: shape.kind().to_owned(),
            json_data: schema::shape_to_value(shape).to_string(),
        })
        .collect();
    store.replace_all(&records)
}

/// Replaces the document's contents with the store's records, in stored
/// order, and clears the undo/redo history (old commands reference shapes
/// that no longer exist). Undecodable records are skipped with a warning.
pub fn load_document(
    document: &mut Document,
    history: &mut CommandHistory,
    store: &dyn ShapeStore,
) -> Result<(), StoreError> {
    let records = store.load_all()?;

    document.take_all();
    history.clear();

    for record in records {
        match serde_json::from_str(&record.json_data) {
            Ok(value) => {
                if let Some(shape) = schema::shape_from_value(&value) {
                    document.append(shape);
                } else {
                    warn!("skipping undecodable {} record", record.shape_type);
                }
            }
            Err(err) => {
                warn!("skipping unparseable {} record: {err}", record.shape_type);
            }
        }
    }
    Ok(())
}

/// In-memory store, used by tests and as the scratch document backing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<ShapeRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ShapeRecord] {
        &self.records
    }
}

impl ShapeStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<ShapeRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn replace_all(&mut self, records: &[ShapeRecord]) -> Result<(), StoreError> {
        self.records = records.to_vec();
        Ok(())
    }
}

/// File-backed store: one JSON array of records. Writes go to a sibling
/// temp file first and are renamed into place, so a failure mid-save leaves
/// the previous file untouched.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ShapeStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<ShapeRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn replace_all(&mut self, records: &[ShapeRecord]) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(records)?;
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
