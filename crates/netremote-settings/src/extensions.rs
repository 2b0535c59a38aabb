// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Music extension whitelist parsing.

/// Entries must be strictly shorter than this (after trimming).
const MAX_EXTENSION_LEN: usize = 8;

/// Separator used both for parsing and for presenting the list for editing.
const SEPARATOR: &str = ",";

/// Parse a comma-separated free-text field into an extension whitelist.
///
/// Each piece is trimmed and kept only if it is non-empty and shorter than
/// eight characters. Everything else is dropped silently; order of the
/// surviving entries follows the input.
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(SEPARATOR)
        .map(str::trim)
        .filter(|ext| {
            let len = ext.chars().count();
            len > 0 && len < MAX_EXTENSION_LEN
        })
        .map(str::to_owned)
        .collect()
}

/// Re-validate a list read back from storage.
///
/// Each stored entry goes through [`parse_extensions`], so blank or
/// over-long entries are dropped and an entry holding a separator is split.
/// The result joins and re-parses to itself.
pub fn normalize_extensions(stored: &[String]) -> Vec<String> {
    stored.iter().flat_map(|entry| parse_extensions(entry)).collect()
}

/// Join a whitelist back into the editable text form.
pub fn join_extensions(extensions: &[String]) -> String {
    extensions.join(SEPARATOR)
}
