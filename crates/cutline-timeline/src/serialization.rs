//! Project serialization with versioning and migration.
//!
//! The on-disk layout is a flat JSON object
//! `{ version, appVersion, name, tracks, duration, mediaLibrary }`.
//! Loading is lenient: missing or null fields take defaults rather than
//! failing, and only unparsable JSON is an error.

use std::path::Path;

use cutline_core::{CutlineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::project::Project;

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Versioned project file wrapper.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    /// Schema version for migration.
    pub version: u32,
    /// Application version that wrote this file.
    #[serde(default)]
    pub app_version: String,
    /// The project data, stored inline.
    #[serde(flatten)]
    pub project: Project,
}

impl ProjectFile {
    /// Create a new project file from a project.
    pub fn new(project: Project) -> Self {
        Self {
            version: CURRENT_VERSION,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            project,
        }
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| CutlineError::Serialization(format!("Failed to serialize project: {}", e)))
    }

    /// Deserialize from JSON bytes, applying migrations if needed.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(data)
            .map_err(|e| CutlineError::Serialization(format!("Invalid JSON: {}", e)))?;
        if !raw.is_object() {
            return Err(CutlineError::Serialization(
                "Project file must be a JSON object".to_string(),
            ));
        }

        let version = raw.get("version").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
        if version > CURRENT_VERSION {
            return Err(CutlineError::Serialization(format!(
                "Project file version {} is newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }

        let migrated = migrate(strip_nulls(raw), version)?;
        let mut file: Self = serde_json::from_value(migrated)
            .map_err(|e| CutlineError::Serialization(format!("Failed to parse project: {}", e)))?;
        file.project.sanitize();
        Ok(file)
    }

    /// Save project to a file path.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        info!(path = %path.display(), name = %self.project.name, "Project saved");
        Ok(())
    }

    /// Load project from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let file = Self::from_json(&data)?;
        info!(
            path = %path.display(),
            name = %file.project.name,
            tracks = file.project.tracks.len(),
            "Project loaded"
        );
        Ok(file)
    }
}

/// Null top-level fields are treated as absent so they pick up defaults.
fn strip_nulls(mut data: Value) -> Value {
    if let Value::Object(map) = &mut data {
        map.retain(|_, v| !v.is_null());
    }
    data
}

/// Apply sequential migrations from `from_version` to CURRENT_VERSION.
fn migrate(mut data: Value, from_version: u32) -> Result<Value> {
    let mut version = from_version;

    while version < CURRENT_VERSION {
        match version {
            0 => {
                // v0 → v1: the unversioned layout is the same object minus the stamp
                if let Value::Object(map) = &mut data {
                    map.insert("version".into(), Value::from(1));
                    map.entry("appVersion").or_insert_with(|| Value::from("0.0.0"));
                }
                version = 1;
            }
            _ => {
                return Err(CutlineError::Serialization(format!(
                    "No migration path from version {}",
                    version
                )));
            }
        }
    }

    Ok(data)
}
