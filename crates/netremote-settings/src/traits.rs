// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Trait definitions for the collaborators the settings layer depends on.
//
// None of these are implemented by the settings logic itself: the key-value
// engine, the transcoder, the host's network stack and the running remote
// control service are all injected.

use std::net::IpAddr;

use netremote_core::error::Result;
use netremote_core::types::{SettingValue, TranscoderPreset};

/// Grouped key-value persistence.
///
/// Writes take effect immediately; implementations must not batch them.
/// Methods take `&self` so a store can be shared between the settings
/// surface and whatever else reads the same keys.
pub trait SettingsBackend {
    /// Read `key` inside `group`. `Ok(None)` when the key was never written.
    fn get(&self, group: &str, key: &str) -> Result<Option<SettingValue>>;

    /// Write `value` to `key` inside `group`, replacing any previous value.
    fn set(&self, group: &str, key: &str, value: SettingValue) -> Result<()>;

    /// Read `key`, falling back to `default` when it is absent.
    fn get_or(&self, group: &str, key: &str, default: SettingValue) -> Result<SettingValue> {
        Ok(self.get(group, key)?.unwrap_or(default))
    }
}

/// Source of every transcoding preset the application knows about.
pub trait PresetSource {
    /// All presets, in the transcoder's own enumeration order.
    fn all_presets(&self) -> Vec<TranscoderPreset>;
}

/// Addresses bound to the host's network interfaces.
pub trait AddressSource {
    /// Every address on every interface, in enumeration order. Both
    /// families are returned; filtering is the caller's job.
    fn host_addresses(&self) -> Result<Vec<IpAddr>>;
}

/// Handle to the running remote-control service.
pub trait RemoteControl {
    /// Ask the service to re-read its settings.
    fn notify_reload(&self) -> Result<()>;
}
