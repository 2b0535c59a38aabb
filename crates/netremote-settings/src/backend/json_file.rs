// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings backend stored as a single pretty-printed JSON document:
//
//     { "network_remote": { "port": 5500, "use_remote": true, ... } }
//
// The whole document is rewritten on every `set`, so writes are never
// batched and a crash loses at most the value being written. The document
// is kept as raw JSON and converted one value at a time on `get`: a value
// this crate cannot represent reads as absent but is written back untouched.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use netremote_core::error::Result;
use netremote_core::types::SettingValue;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::traits::SettingsBackend;

/// Suffix of the copy made before an unparseable file is replaced.
const BACKUP_SUFFIX: &str = ".bak";

/// JSON-file settings backend.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    document: Mutex<Map<String, Value>>,
}

impl JsonFileBackend {
    /// Open the settings file at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object is
    /// copied to `<path>.bak` and the store starts empty; if that copy fails
    /// the open fails, so the original is never overwritten unsaved.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = match std::fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<Value>(&data) {
                Ok(Value::Object(doc)) => doc,
                Ok(_) => {
                    warn!("settings file is not a JSON object, starting empty");
                    back_up(&path)?;
                    Map::new()
                }
                Err(e) => {
                    warn!(error = %e, "settings file is not valid JSON, starting empty");
                    back_up(&path)?;
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings file yet");
                Map::new()
            }
            Err(e) => return Err(e.into()),
        };

        info!(groups = document.len(), "settings file opened");
        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, document: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsBackend for JsonFileBackend {
    fn get(&self, group: &str, key: &str) -> Result<Option<SettingValue>> {
        let document = self.lock();
        let Some(raw) = document
            .get(group)
            .and_then(Value::as_object)
            .and_then(|g| g.get(key))
        else {
            return Ok(None);
        };

        match serde_json::from_value(raw.clone()) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                warn!(group, key, value = %raw, "unrepresentable setting value ignored");
                Ok(None)
            }
        }
    }

    fn set(&self, group: &str, key: &str, value: SettingValue) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let mut document = self.lock();
        let entry = document
            .entry(group.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            warn!(group, "settings group was not an object, replacing it");
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(values) = entry {
            values.insert(key.to_owned(), value);
        }
        self.persist(&document)
    }
}

/// Copy `path` to `<path>.bak`.
fn back_up(path: &Path) -> Result<()> {
    let mut backup = OsString::from(path.as_os_str());
    backup.push(BACKUP_SUFFIX);
    let backup = PathBuf::from(backup);
    std::fs::copy(path, &backup)?;
    warn!(backup = %backup.display(), "unreadable settings file backed up");
    Ok(())
}
