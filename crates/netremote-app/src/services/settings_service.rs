// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Builds a `RemoteSettingsStore` over the configured backend.

use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use netremote_core::error::Result;
use netremote_settings::{
    BuiltinPresets, JsonFileBackend, MemoryBackend, NetworkInterfaceScanner, PresetCatalog,
    ReloadChannel, ReloadRequest, RemoteSettingsStore, SettingsBackend, SqliteBackend,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use super::data_dir;

/// Persistence backend for the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Pretty-printed `settings.json`.
    Json,
    /// SQLite database `settings.db`.
    Sqlite,
}

impl BackendKind {
    fn file_name(self) -> &'static str {
        match self {
            Self::Json => "settings.json",
            Self::Sqlite => "settings.db",
        }
    }

    fn open(self, dir: Option<&Path>) -> Result<Arc<dyn SettingsBackend>> {
        let path = data_dir::settings_path(dir, self.file_name());
        info!(backend = ?self, path = %path.display(), "opening settings backend");
        let backend: Arc<dyn SettingsBackend> = match self {
            Self::Json => Arc::new(JsonFileBackend::open(&path)?),
            Self::Sqlite => Arc::new(SqliteBackend::open(&path)?),
        };
        Ok(backend)
    }
}

/// A settings store plus the receiving end of its reload channel.
pub struct SettingsService {
    pub store: RemoteSettingsStore,
    pub reloads: UnboundedReceiver<ReloadRequest>,
}

impl SettingsService {
    /// Open `backend` in `dir` (or the user data directory).
    ///
    /// If it cannot be opened the service runs on an in-memory store so the
    /// settings can still be inspected.
    pub fn init(backend: BackendKind, dir: Option<&Path>) -> Self {
        let backend = backend.open(dir).unwrap_or_else(|e| {
            warn!(error = %e, "persistent settings unavailable, using in-memory store");
            Arc::new(MemoryBackend::new()) as Arc<dyn SettingsBackend>
        });

        let (channel, reloads) = ReloadChannel::new();
        let store = RemoteSettingsStore::new(
            backend,
            PresetCatalog::new(&BuiltinPresets),
            NetworkInterfaceScanner::system(),
        )
        .with_remote(Arc::new(channel));

        Self { store, reloads }
    }

    /// Drain reload requests the store has sent since the last call.
    pub fn pending_reloads(&mut self) -> usize {
        let mut count = 0;
        while self.reloads.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}
