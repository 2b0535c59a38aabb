// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Volatile settings backend.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use netremote_core::error::Result;
use netremote_core::types::SettingValue;

use crate::traits::SettingsBackend;

/// Settings held in memory only. Used for tests and as a fallback when no
/// writable data directory exists.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<BTreeMap<(String, String), SettingValue>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<(String, String), SettingValue>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether `key` in `group` has ever been written.
    pub fn contains(&self, group: &str, key: &str) -> bool {
        self.lock()
            .contains_key(&(group.to_owned(), key.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsBackend for MemoryBackend {
    fn get(&self, group: &str, key: &str) -> Result<Option<SettingValue>> {
        Ok(self.lock().get(&(group.to_owned(), key.to_owned())).cloned())
    }

    fn set(&self, group: &str, key: &str, value: SettingValue) -> Result<()> {
        self.lock()
            .insert((group.to_owned(), key.to_owned()), value);
        Ok(())
    }
}
