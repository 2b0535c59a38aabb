// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where the settings file lives.

use std::path::{Path, PathBuf};

/// Subdirectory of the user data directory owned by this program.
const APP_DIR: &str = "netremote";

/// Path of the settings file `file_name`.
///
/// `dir` overrides the location; otherwise the file goes under
/// `$XDG_DATA_HOME/netremote` (or `~/.local/share/netremote`). The directory
/// is created if missing; failure to create it surfaces when the backend
/// opens the file.
pub fn settings_path(dir: Option<&Path>, file_name: &str) -> PathBuf {
    let dir = dir.map_or_else(|| user_data_dir().join(APP_DIR), Path::to_path_buf);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "could not create settings directory");
    }
    dir.join(file_name)
}

fn user_data_dir() -> PathBuf {
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(std::env::temp_dir)
}
