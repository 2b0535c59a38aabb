// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Network remote configuration and its persisted key layout.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings group under which every network remote key is stored.
pub const SETTINGS_GROUP: &str = "network_remote";

/// Port the remote-control server listens on when none is configured.
pub const DEFAULT_SERVER_PORT: u16 = 5500;

/// Output format selected when none is persisted.
pub const DEFAULT_OUTPUT_FORMAT: &str = "audio/x-vorbis";

/// Suffix appended to the transcoder's options group so the remote keeps
/// its own encoder settings apart from the main transcoder dialog.
pub const TRANSCODER_SETTINGS_POSTFIX: &str = "/NetworkRemote";

/// Extensions the remote may browse when the user has not chosen any.
pub const DEFAULT_MUSIC_EXTENSIONS: &[&str] =
    &["aac", "alac", "flac", "m3u", "m4a", "mp3", "ogg", "wav", "wmv"];

/// Upper bound (exclusive) of a generated auth code: five digits.
pub const AUTH_CODE_RANGE: u32 = 100_000;

/// Persisted key names inside [`SETTINGS_GROUP`].
pub mod keys {
    pub const USE_REMOTE: &str = "use_remote";
    pub const PORT: &str = "port";
    pub const ONLY_NON_PUBLIC_IP: &str = "only_non_public_ip";
    pub const USE_AUTH_CODE: &str = "use_auth_code";
    pub const AUTH_CODE: &str = "auth_code";
    pub const ALLOW_DOWNLOADS: &str = "allow_downloads";
    pub const CONVERT_LOSSLESS: &str = "convert_lossless";
    pub const LAST_OUTPUT_FORMAT: &str = "last_output_format";
    pub const FILES_ROOT_FOLDER: &str = "files_root_folder";
    pub const FILES_MUSIC_EXTENSIONS: &str = "files_music_extensions";
}

/// Persistent network remote settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Whether the remote-control server runs at all.
    pub enabled: bool,
    /// Listening port (1–65535).
    pub port: u16,
    /// Only accept clients from private address ranges.
    pub only_non_public_ip: bool,
    /// Require clients to present [`auth_code`](Self::auth_code).
    pub use_auth_code: bool,
    /// Numeric access code.
    pub auth_code: u32,
    /// Let clients download files.
    pub allow_downloads: bool,
    /// Transcode lossless files before sending them.
    pub convert_lossless: bool,
    /// Codec mimetype of the transcoding preset. Opaque; may name a preset
    /// that no longer exists.
    pub output_format_id: String,
    /// Folder the remote may browse. Empty means unset.
    pub root_folder: PathBuf,
    /// File extensions considered music when browsing.
    pub allowed_extensions: Vec<String>,
}

impl Default for RemoteSettings {
    /// Defaults for a fresh install. `auth_code` is a placeholder here; the
    /// settings store replaces it with a generated code on first load.
    fn default() -> Self {
        Self {
            enabled: false,
            port: DEFAULT_SERVER_PORT,
            only_non_public_ip: true,
            use_auth_code: false,
            auth_code: 0,
            allow_downloads: false,
            convert_lossless: false,
            output_format_id: DEFAULT_OUTPUT_FORMAT.to_owned(),
            root_folder: PathBuf::new(),
            allowed_extensions: default_music_extensions(),
        }
    }
}

/// Owned copy of [`DEFAULT_MUSIC_EXTENSIONS`].
pub fn default_music_extensions() -> Vec<String> {
    DEFAULT_MUSIC_EXTENSIONS.iter().map(|s| (*s).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fresh_install() {
        let s = RemoteSettings::default();
        assert!(!s.enabled);
        assert_eq!(s.port, 5500);
        assert!(s.only_non_public_ip);
        assert!(!s.use_auth_code);
        assert!(!s.allow_downloads);
        assert!(!s.convert_lossless);
        assert_eq!(s.output_format_id, "audio/x-vorbis");
        assert!(s.root_folder.as_os_str().is_empty());
        assert_eq!(s.allowed_extensions.len(), DEFAULT_MUSIC_EXTENSIONS.len());
    }

    #[test]
    fn default_extensions_are_valid_whitelist_entries() {
        for ext in DEFAULT_MUSIC_EXTENSIONS {
            assert!(!ext.is_empty() && ext.len() < 8, "bad default extension {ext}");
        }
    }
}
