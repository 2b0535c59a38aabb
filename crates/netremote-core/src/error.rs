// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the network remote settings.

use thiserror::Error;

/// Top-level error type for all settings operations.
///
/// Missing or malformed persisted values are never errors; these variants
/// only describe failures of the collaborators behind the settings layer.
#[derive(Debug, Error)]
pub enum NetRemoteError {
    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Host / services --
    #[error("network interface enumeration failed: {0}")]
    Interfaces(String),

    #[error("remote control service is not listening for reloads")]
    ReloadUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NetRemoteError>;
