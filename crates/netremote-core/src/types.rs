// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: transcoder presets and persisted setting values.

use serde::{Deserialize, Serialize};

/// Audio container/codec family a preset encodes to.
///
/// Opaque to the settings layer; it is handed through to the transcoder to
/// pick an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    Flac,
    Mp4,
    Mpeg,
    OggVorbis,
    OggFlac,
    OggSpeex,
    OggOpus,
    /// Advanced Systems Format (Windows Media audio).
    Asf,
    Wav,
}

impl FileType {
    /// GStreamer element name of the encoder used for this type, if any.
    ///
    /// Encoder options are stored per element, so this doubles as the key
    /// of the options settings group.
    pub fn encoder_element(&self) -> Option<&'static str> {
        match self {
            Self::Flac | Self::OggFlac => Some("flacenc"),
            Self::Mp4 => Some("faac"),
            Self::Mpeg => Some("lamemp3enc"),
            Self::OggVorbis => Some("vorbisenc"),
            Self::OggSpeex => Some("speexenc"),
            Self::OggOpus => Some("opusenc"),
            Self::Asf => Some("ffenc_wmav2"),
            Self::Wav => None,
        }
    }
}

/// A named audio-encoding configuration supplied by the transcoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscoderPreset {
    /// Display name, e.g. "Ogg Vorbis".
    pub name: String,
    /// File suffix without the leading dot.
    pub extension: String,
    /// Stable identifier persisted as the selected output format.
    pub codec_mimetype: String,
    /// Encoder selection token.
    pub file_type: FileType,
}

impl TranscoderPreset {
    pub fn new(
        name: impl Into<String>,
        extension: impl Into<String>,
        codec_mimetype: impl Into<String>,
        file_type: FileType,
    ) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            codec_mimetype: codec_mimetype.into(),
            file_type,
        }
    }

    /// Label shown in the format selector: `"Ogg Vorbis (.ogg)"`.
    pub fn label(&self) -> String {
        format!("{} (.{})", self.name, self.extension)
    }
}

/// A single value held by the persistence layer.
///
/// Serialized untagged so that JSON-backed stores read naturally
/// (`"port": 5500`, `"files_music_extensions": ["mp3", "ogg"]`).
/// The accessors are lenient: a value written as text by some other tool
/// still reads back as a bool or integer where the text allows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(n) => Some(*n != 0),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" | "" => Some(false),
                _ => None,
            },
            Self::List(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Text(s) => s.trim().parse().ok(),
            Self::List(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::List(_) => None,
        }
    }

    /// Lists read as-is; a lone text value is a one-element list (an empty
    /// text value is an empty list).
    pub fn as_list(&self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => Some(items.clone()),
            Self::Text(s) if s.is_empty() => Some(Vec::new()),
            Self::Text(s) => Some(vec![s.clone()]),
            Self::Bool(_) | Self::Int(_) => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}
