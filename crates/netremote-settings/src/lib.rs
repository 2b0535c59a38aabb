// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Network remote settings — loads the persisted remote-control configuration
// with defaults applied, builds the transcoding preset catalog, reports the
// host's local addresses, and writes validated settings back before asking
// the running remote-control service to reload.

pub mod auth_code;
pub mod backend;
pub mod extensions;
pub mod interfaces;
pub mod links;
pub mod presets;
pub mod reload;
pub mod store;
pub mod traits;

pub use auth_code::{AuthCodeGenerator, RandomAuthCode};
pub use backend::{JsonFileBackend, MemoryBackend, SqliteBackend};
pub use extensions::parse_extensions;
pub use interfaces::{NetworkInterfaceScanner, SystemAddresses};
pub use links::RemoteClientLink;
pub use presets::{BuiltinPresets, PresetCatalog};
pub use reload::{ReloadChannel, ReloadRequest};
pub use store::{RemoteSettingsForm, RemoteSettingsStore};
pub use traits::{AddressSource, PresetSource, RemoteControl, SettingsBackend};
