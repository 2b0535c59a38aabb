// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transcoding preset catalog.
//
// The catalog is built once per settings surface from whatever the transcoder
// reports, sorted by display name so the format selector is stable, and used
// to map the persisted codec mimetype back to a selector index.

use netremote_core::config::TRANSCODER_SETTINGS_POSTFIX;
use netremote_core::types::{FileType, TranscoderPreset};
use tracing::debug;

use crate::traits::PresetSource;

/// Presets sorted by name, cached for the lifetime of the settings surface.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<TranscoderPreset>,
}

impl PresetCatalog {
    /// Fetch every preset from `source` and sort it.
    pub fn new(source: &dyn PresetSource) -> Self {
        Self::from_presets(source.all_presets())
    }

    /// Build a catalog from an already fetched preset list.
    ///
    /// Names compare case-sensitively (byte order). The sort is stable, so
    /// presets sharing a name keep the order the transcoder reported them in.
    pub fn from_presets(mut presets: Vec<TranscoderPreset>) -> Self {
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = presets.len(), "preset catalog built");
        Self { presets }
    }

    /// All presets in display order.
    pub fn all(&self) -> &[TranscoderPreset] {
        &self.presets
    }

    pub fn get(&self, index: usize) -> Option<&TranscoderPreset> {
        self.presets.get(index)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Index of the first preset whose codec mimetype is `codec_mimetype`.
    ///
    /// `None` means nothing should be selected; callers must not substitute
    /// another preset.
    pub fn index_of(&self, codec_mimetype: &str) -> Option<usize> {
        self.presets
            .iter()
            .position(|p| p.codec_mimetype == codec_mimetype)
    }

    /// Settings group holding the encoder options the remote uses for the
    /// preset at `index`, e.g. `"Transcoder/vorbisenc/NetworkRemote"`.
    pub fn options_group(&self, index: usize) -> Option<String> {
        let element = self.get(index)?.file_type.encoder_element()?;
        Some(format!("Transcoder/{element}{TRANSCODER_SETTINGS_POSTFIX}"))
    }
}

/// The presets bundled with the application's transcoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPresets;

impl PresetSource for BuiltinPresets {
    fn all_presets(&self) -> Vec<TranscoderPreset> {
        [
            FileType::Flac,
            FileType::Mp4,
            FileType::Mpeg,
            FileType::OggVorbis,
            FileType::OggFlac,
            FileType::OggSpeex,
            FileType::Asf,
            FileType::Wav,
            FileType::OggOpus,
        ]
        .into_iter()
        .map(preset_for_file_type)
        .collect()
    }
}

fn preset_for_file_type(file_type: FileType) -> TranscoderPreset {
    let (name, extension, mimetype) = match file_type {
        FileType::Flac => ("FLAC", "flac", "audio/x-flac"),
        FileType::Mp4 => ("M4A AAC", "mp4", "audio/mpeg, mpegversion=(int)4"),
        FileType::Mpeg => ("MP3", "mp3", "audio/mpeg, mpegversion=(int)1, layer=(int)3"),
        FileType::OggVorbis => ("Ogg Vorbis", "ogg", "audio/x-vorbis"),
        FileType::OggFlac => ("Ogg Flac", "ogg", "audio/x-flac"),
        FileType::OggSpeex => ("Ogg Speex", "spx", "audio/x-speex"),
        FileType::OggOpus => ("Ogg Opus", "opus", "audio/x-opus"),
        FileType::Asf => ("Windows Media audio", "wma", "audio/x-wma"),
        FileType::Wav => ("Wav", "wav", "audio/x-raw"),
    };
    TranscoderPreset::new(name, extension, mimetype, file_type)
}
