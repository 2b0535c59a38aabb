// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Network remote settings store — loads the persisted settings into a
// display-ready form and writes an edited form back.
//
// Every key has a default, so loading never fails because of what is (or is
// not) in the store; only the backend itself can fail. Values of the wrong
// shape are treated as absent and logged.

use std::path::PathBuf;
use std::sync::Arc;

use netremote_core::config::{self, RemoteSettings, SETTINGS_GROUP, keys};
use netremote_core::error::Result;
use netremote_core::types::{SettingValue, TranscoderPreset};
use tracing::{info, instrument, warn};

use crate::auth_code::{AuthCodeGenerator, RandomAuthCode};
use crate::extensions::{join_extensions, normalize_extensions, parse_extensions};
use crate::interfaces::NetworkInterfaceScanner;
use crate::presets::PresetCatalog;
use crate::traits::{RemoteControl, SettingsBackend};

/// Settings as presented for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettingsForm {
    /// The persisted values, defaults applied.
    pub settings: RemoteSettings,
    /// Catalog index of the preset matching `settings.output_format_id`.
    /// `None` when no preset matches.
    pub selected_format: Option<usize>,
    /// Editable comma-separated extension list. This text, not
    /// `settings.allowed_extensions`, is what gets saved.
    pub extensions_text: String,
    /// Local IPv4 addresses clients can connect to, for display.
    pub local_addresses: String,
}

/// Loads and saves the network remote settings group.
pub struct RemoteSettingsStore {
    backend: Arc<dyn SettingsBackend>,
    catalog: PresetCatalog,
    scanner: NetworkInterfaceScanner,
    auth_codes: Box<dyn AuthCodeGenerator>,
    remote: Option<Arc<dyn RemoteControl>>,
}

impl RemoteSettingsStore {
    /// Create a store over `backend`.
    ///
    /// The catalog is built by the caller once per settings surface and kept
    /// for as many load/save cycles as needed.
    pub fn new(
        backend: Arc<dyn SettingsBackend>,
        catalog: PresetCatalog,
        scanner: NetworkInterfaceScanner,
    ) -> Self {
        Self {
            backend,
            catalog,
            scanner,
            auth_codes: Box::new(RandomAuthCode),
            remote: None,
        }
    }

    /// Replace the generator used when no auth code is persisted.
    pub fn with_auth_codes(mut self, generator: impl AuthCodeGenerator + 'static) -> Self {
        self.auth_codes = Box::new(generator);
        self
    }

    /// Attach the running remote-control service so saves trigger a reload.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteControl>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Read every setting, apply defaults, and resolve the display fields.
    ///
    /// If no auth code is stored yet a new one is generated and written back
    /// straight away, so the code shown now is the one later loads return.
    #[instrument(skip_all, fields(group = SETTINGS_GROUP))]
    pub fn load(&self) -> Result<RemoteSettingsForm> {
        let defaults = RemoteSettings::default();

        let enabled = self.read(keys::USE_REMOTE, defaults.enabled, SettingValue::as_bool)?;
        let port = self.read(keys::PORT, defaults.port, |v| {
            v.as_int()
                .and_then(|n| u16::try_from(n).ok())
                .filter(|port| *port != 0)
        })?;
        let only_non_public_ip = self.read(
            keys::ONLY_NON_PUBLIC_IP,
            defaults.only_non_public_ip,
            SettingValue::as_bool,
        )?;
        let use_auth_code =
            self.read(keys::USE_AUTH_CODE, defaults.use_auth_code, SettingValue::as_bool)?;
        let auth_code = self.load_auth_code()?;
        let allow_downloads =
            self.read(keys::ALLOW_DOWNLOADS, defaults.allow_downloads, SettingValue::as_bool)?;
        let convert_lossless = self.read(
            keys::CONVERT_LOSSLESS,
            defaults.convert_lossless,
            SettingValue::as_bool,
        )?;
        let output_format_id = self.read(
            keys::LAST_OUTPUT_FORMAT,
            defaults.output_format_id,
            SettingValue::as_text,
        )?;
        let root_folder = self.read(keys::FILES_ROOT_FOLDER, defaults.root_folder, |v| {
            v.as_text().map(PathBuf::from)
        })?;
        let allowed_extensions = self.read(
            keys::FILES_MUSIC_EXTENSIONS,
            defaults.allowed_extensions,
            |v| v.as_list().map(|list| normalize_extensions(&list)),
        )?;

        let selected_format = self.catalog.index_of(&output_format_id);
        if selected_format.is_none() {
            warn!(format = %output_format_id, "saved output format matches no preset");
        }

        let form = RemoteSettingsForm {
            extensions_text: join_extensions(&allowed_extensions),
            local_addresses: self.scanner.scan(),
            selected_format,
            settings: RemoteSettings {
                enabled,
                port,
                only_non_public_ip,
                use_auth_code,
                auth_code,
                allow_downloads,
                convert_lossless,
                output_format_id,
                root_folder,
                allowed_extensions,
            },
        };

        info!(enabled, port, "network remote settings loaded");
        Ok(form)
    }

    /// Write `form` back to the backend and notify the remote-control
    /// service, if one is attached.
    ///
    /// The extension text is validated before it is stored. A failed reload
    /// notification is logged, not returned.
    #[instrument(skip_all, fields(group = SETTINGS_GROUP))]
    pub fn save(&self, form: &RemoteSettingsForm) -> Result<()> {
        let s = &form.settings;

        self.write(keys::PORT, i64::from(s.port))?;
        self.write(keys::USE_REMOTE, s.enabled)?;
        self.write(keys::ONLY_NON_PUBLIC_IP, s.only_non_public_ip)?;
        self.write(keys::USE_AUTH_CODE, s.use_auth_code)?;
        self.write(keys::AUTH_CODE, i64::from(s.auth_code))?;
        self.write(keys::ALLOW_DOWNLOADS, s.allow_downloads)?;
        self.write(keys::CONVERT_LOSSLESS, s.convert_lossless)?;
        self.write(keys::LAST_OUTPUT_FORMAT, s.output_format_id.as_str())?;
        self.write(
            keys::FILES_ROOT_FOLDER,
            s.root_folder.to_string_lossy().into_owned(),
        )?;

        let extensions = parse_extensions(&form.extensions_text);
        let extension_count = extensions.len();
        self.write(keys::FILES_MUSIC_EXTENSIONS, extensions)?;

        info!(
            enabled = s.enabled,
            port = s.port,
            extensions = extension_count,
            "network remote settings saved"
        );

        if let Some(remote) = &self.remote
            && let Err(e) = remote.notify_reload()
        {
            warn!(error = %e, "remote control service did not take the reload");
        }
        Ok(())
    }

    /// Select the catalog entry at `index` as the output format.
    ///
    /// Returns the selected preset, or `None` (leaving the form untouched)
    /// when `index` is out of range.
    pub fn select_format<'a>(
        &'a self,
        form: &mut RemoteSettingsForm,
        index: usize,
    ) -> Option<&'a TranscoderPreset> {
        let preset = self.catalog.get(index)?;
        form.selected_format = Some(index);
        form.settings.output_format_id = preset.codec_mimetype.clone();
        Some(preset)
    }

    /// Preset currently selected in `form`.
    pub fn selected_preset(&self, form: &RemoteSettingsForm) -> Option<&TranscoderPreset> {
        form.selected_format.and_then(|i| self.catalog.get(i))
    }

    /// Settings group of the encoder options for the selected preset.
    pub fn encoder_options_group(&self, form: &RemoteSettingsForm) -> Option<String> {
        self.catalog.options_group(form.selected_format?)
    }

    // -- internal helpers ---------------------------------------------------

    /// Stored code if the key exists, otherwise a freshly generated one that
    /// is written back. A stored code is never replaced: values that are not
    /// a plain `u32` are clamped into range, and non-numeric values read as 0.
    fn load_auth_code(&self) -> Result<u32> {
        if let Some(value) = self.backend.get(SETTINGS_GROUP, keys::AUTH_CODE)? {
            let code = match value.as_int() {
                Some(n) => n.clamp(0, i64::from(u32::MAX)) as u32,
                None => 0,
            };
            if value.as_int() != Some(i64::from(code)) {
                warn!(key = keys::AUTH_CODE, ?value, code, "stored auth code read leniently");
            }
            return Ok(code);
        }

        let code = self.auth_codes.generate() % config::AUTH_CODE_RANGE;
        self.write(keys::AUTH_CODE, i64::from(code))?;
        info!("generated initial auth code");
        Ok(code)
    }

    /// Read `key`, converting with `convert`; absent or unconvertible values
    /// yield `default`.
    fn read<T>(
        &self,
        key: &str,
        default: T,
        convert: impl FnOnce(&SettingValue) -> Option<T>,
    ) -> Result<T> {
        let Some(value) = self.backend.get(SETTINGS_GROUP, key)? else {
            return Ok(default);
        };
        match convert(&value) {
            Some(v) => Ok(v),
            None => {
                warn!(key, ?value, "unusable setting value, using default");
                Ok(default)
            }
        }
    }

    fn write(&self, key: &str, value: impl Into<SettingValue>) -> Result<()> {
        self.backend.set(SETTINGS_GROUP, key, value.into())
    }
}

#[cfg(test)]
mod tests {
    use std::net::IpAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use netremote_core::error::NetRemoteError;

    use super::*;
    use crate::backend::{JsonFileBackend, MemoryBackend};
    use crate::presets::BuiltinPresets;
    use crate::traits::AddressSource;

    struct FixedAddresses(Vec<IpAddr>);

    impl AddressSource for FixedAddresses {
        fn host_addresses(&self) -> Result<Vec<IpAddr>> {
            Ok(self.0.clone())
        }
    }

    /// Hands out 4242, 4243, ... so a regenerated code is detectable.
    #[derive(Default)]
    struct SequentialCodes(AtomicUsize);

    impl AuthCodeGenerator for SequentialCodes {
        fn generate(&self) -> u32 {
            4242 + self.0.fetch_add(1, Ordering::SeqCst) as u32
        }
    }

    #[derive(Default)]
    struct CountingRemote(AtomicUsize);

    impl RemoteControl for CountingRemote {
        fn notify_reload(&self) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct DeadRemote;

    impl RemoteControl for DeadRemote {
        fn notify_reload(&self) -> Result<()> {
            Err(NetRemoteError::ReloadUnavailable)
        }
    }

    struct ReadOnlyBackend;

    impl SettingsBackend for ReadOnlyBackend {
        fn get(&self, _group: &str, _key: &str) -> Result<Option<SettingValue>> {
            Ok(None)
        }

        fn set(&self, _group: &str, _key: &str, _value: SettingValue) -> Result<()> {
            Err(NetRemoteError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only settings",
            )))
        }
    }

    fn store_over(backend: Arc<dyn SettingsBackend>) -> RemoteSettingsStore {
        let scanner = NetworkInterfaceScanner::new(FixedAddresses(vec![
            "127.0.0.1".parse().expect("addr"),
            "192.168.1.5".parse().expect("addr"),
            "::1".parse().expect("addr"),
            "10.0.0.2".parse().expect("addr"),
        ]));
        RemoteSettingsStore::new(backend, PresetCatalog::new(&BuiltinPresets), scanner)
            .with_auth_codes(SequentialCodes::default())
    }

    fn stored(backend: &MemoryBackend, key: &str) -> Option<SettingValue> {
        backend.get(SETTINGS_GROUP, key).expect("get")
    }

    #[test]
    fn empty_store_loads_defaults() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());
        let form = store.load().expect("load");

        let s = &form.settings;
        assert!(!s.enabled);
        assert_eq!(s.port, config::DEFAULT_SERVER_PORT);
        assert!(s.only_non_public_ip);
        assert!(!s.use_auth_code);
        assert_eq!(s.auth_code, 4242);
        assert!(!s.allow_downloads);
        assert!(!s.convert_lossless);
        assert_eq!(s.output_format_id, "audio/x-vorbis");
        assert_eq!(s.root_folder, PathBuf::new());
        assert_eq!(s.allowed_extensions, config::default_music_extensions());

        assert_eq!(form.extensions_text, "aac,alac,flac,m3u,m4a,mp3,ogg,wav,wmv");
        assert_eq!(form.local_addresses, "192.168.1.5, 10.0.0.2");
        let selected = store.selected_preset(&form).expect("vorbis selected");
        assert_eq!(selected.name, "Ogg Vorbis");
    }

    #[test]
    fn generated_auth_code_is_persisted_once() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());

        let first = store.load().expect("load").settings.auth_code;
        assert_eq!(stored(&backend, keys::AUTH_CODE), Some(SettingValue::Int(4242)));

        // The generator would now return 4243; the stored code must win.
        let second = store.load().expect("reload").settings.auth_code;
        assert_eq!(first, second);
        assert_eq!(backend.len(), 1, "load writes nothing but the auth code");
    }

    #[test]
    fn persisted_auth_code_is_returned_verbatim() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set(SETTINGS_GROUP, keys::AUTH_CODE, SettingValue::Int(7))
            .expect("seed");
        let store = store_over(backend.clone());
        assert_eq!(store.load().expect("load").settings.auth_code, 7);
    }

    #[test]
    fn save_then_load_round_trips() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());

        let mut form = store.load().expect("load");
        form.settings.enabled = true;
        form.settings.port = 8080;
        form.settings.only_non_public_ip = false;
        form.settings.use_auth_code = true;
        form.settings.allow_downloads = true;
        form.settings.convert_lossless = true;
        form.settings.root_folder = PathBuf::from("/srv/music");
        let mp3 = store
            .catalog()
            .all()
            .iter()
            .position(|p| p.name == "MP3")
            .expect("mp3 preset");
        store.select_format(&mut form, mp3).expect("select");
        form.extensions_text = "mp3, flac ,ogg".into();

        store.save(&form).expect("save");
        let reloaded = store.load().expect("reload");

        assert_eq!(reloaded.settings.allowed_extensions, vec!["mp3", "flac", "ogg"]);
        assert_eq!(reloaded.extensions_text, "mp3,flac,ogg");
        assert_eq!(reloaded.selected_format, Some(mp3));
        let mut expected = form.settings.clone();
        expected.allowed_extensions = vec!["mp3".into(), "flac".into(), "ogg".into()];
        assert_eq!(reloaded.settings, expected);

        // Saving what was just loaded changes nothing.
        store.save(&reloaded).expect("save again");
        assert_eq!(store.load().expect("load again"), reloaded);
    }

    #[test]
    fn save_validates_extension_text() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());
        let mut form = store.load().expect("load");
        form.extensions_text = "mp3, , toolongext, ogg,flac".into();

        store.save(&form).expect("save");
        assert_eq!(
            stored(&backend, keys::FILES_MUSIC_EXTENSIONS),
            Some(SettingValue::List(vec!["mp3".into(), "ogg".into(), "flac".into()]))
        );
    }

    #[test]
    fn save_writes_every_key() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone());
        store.save(&store.load().expect("load")).expect("save");

        for key in [
            keys::USE_REMOTE,
            keys::PORT,
            keys::ONLY_NON_PUBLIC_IP,
            keys::USE_AUTH_CODE,
            keys::AUTH_CODE,
            keys::ALLOW_DOWNLOADS,
            keys::CONVERT_LOSSLESS,
            keys::LAST_OUTPUT_FORMAT,
            keys::FILES_ROOT_FOLDER,
            keys::FILES_MUSIC_EXTENSIONS,
        ] {
            assert!(backend.contains(SETTINGS_GROUP, key), "{key} not written");
        }
        assert_eq!(stored(&backend, keys::PORT), Some(SettingValue::Int(5500)));
        assert_eq!(stored(&backend, keys::USE_REMOTE), Some(SettingValue::Bool(false)));
    }

    #[test]
    fn unknown_output_format_leaves_nothing_selected() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set(SETTINGS_GROUP, keys::LAST_OUTPUT_FORMAT, "audio/x-retired".into())
            .expect("seed");
        let store = store_over(backend.clone());

        let form = store.load().expect("load");
        assert_eq!(form.selected_format, None);
        assert!(store.selected_preset(&form).is_none());
        assert!(store.encoder_options_group(&form).is_none());

        // The opaque id survives a save untouched.
        store.save(&form).expect("save");
        assert_eq!(
            stored(&backend, keys::LAST_OUTPUT_FORMAT),
            Some(SettingValue::Text("audio/x-retired".into()))
        );
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let backend = Arc::new(MemoryBackend::new());
        let seed = [
            (keys::PORT, SettingValue::Int(70_000)),
            (keys::USE_REMOTE, SettingValue::Text("yes please".into())),
            (keys::ONLY_NON_PUBLIC_IP, SettingValue::Text("false".into())),
            (keys::FILES_MUSIC_EXTENSIONS, SettingValue::Int(3)),
            (keys::AUTH_CODE, SettingValue::Int(-5)),
        ];
        for (key, value) in seed {
            backend.set(SETTINGS_GROUP, key, value).expect("seed");
        }
        let store = store_over(backend.clone());
        let s = store.load().expect("load").settings;

        assert_eq!(s.port, config::DEFAULT_SERVER_PORT);
        assert!(!s.enabled);
        assert!(!s.only_non_public_ip, "text 'false' is still a usable bool");
        assert_eq!(s.allowed_extensions, config::default_music_extensions());
        assert_eq!(s.auth_code, 0, "negative code clamps, it is not regenerated");
        assert_eq!(stored(&backend, keys::AUTH_CODE), Some(SettingValue::Int(-5)));
    }

    #[test]
    fn non_numeric_auth_code_is_kept_in_store() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set(SETTINGS_GROUP, keys::AUTH_CODE, SettingValue::Text("abc".into()))
            .expect("seed");
        let store = store_over(backend.clone());

        assert_eq!(store.load().expect("load").settings.auth_code, 0);
        assert_eq!(
            stored(&backend, keys::AUTH_CODE),
            Some(SettingValue::Text("abc".into()))
        );
        assert_eq!(backend.len(), 1, "load must not write over a stored code");
    }

    #[test]
    fn stored_extensions_are_revalidated_on_load() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set(
                SETTINGS_GROUP,
                keys::FILES_MUSIC_EXTENSIONS,
                SettingValue::List(vec!["mp3".into(), "".into(), "toolongext".into(), " ogg ".into()]),
            )
            .expect("seed");
        let store = store_over(backend.clone());

        let first = store.load().expect("load");
        assert_eq!(first.settings.allowed_extensions, vec!["mp3", "ogg"]);
        assert_eq!(first.extensions_text, "mp3,ogg");

        store.save(&first).expect("save");
        let second = store.load().expect("reload");
        assert_eq!(first, second);
    }

    #[test]
    fn text_extension_value_is_split() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set(SETTINGS_GROUP, keys::FILES_MUSIC_EXTENSIONS, SettingValue::Text("mp3,ogg".into()))
            .expect("seed");
        let store = store_over(backend.clone());

        let form = store.load().expect("load");
        assert_eq!(form.settings.allowed_extensions, vec!["mp3", "ogg"]);
        store.save(&form).expect("save");
        assert_eq!(
            stored(&backend, keys::FILES_MUSIC_EXTENSIONS),
            Some(SettingValue::List(vec!["mp3".into(), "ogg".into()]))
        );
    }

    #[test]
    fn port_zero_is_rejected() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .set(SETTINGS_GROUP, keys::PORT, SettingValue::Int(0))
            .expect("seed");
        let store = store_over(backend.clone());
        assert_eq!(store.load().expect("load").settings.port, 5500);
    }

    #[test]
    fn save_notifies_remote() {
        let backend = Arc::new(MemoryBackend::new());
        let remote = Arc::new(CountingRemote::default());
        let store = store_over(backend.clone()).with_remote(remote.clone());

        let form = store.load().expect("load");
        assert_eq!(remote.0.load(Ordering::SeqCst), 0, "load must not notify");
        store.save(&form).expect("save");
        assert_eq!(remote.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_notification_does_not_fail_save() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store_over(backend.clone()).with_remote(Arc::new(DeadRemote));
        let form = store.load().expect("load");
        assert!(store.save(&form).is_ok());
    }

    #[test]
    fn backend_errors_propagate() {
        let store = store_over(Arc::new(ReadOnlyBackend));
        // Load must generate and persist an auth code, which this backend refuses.
        assert!(matches!(store.load(), Err(NetRemoteError::Io(_))));

        let form = RemoteSettingsForm {
            settings: RemoteSettings::default(),
            selected_format: None,
            extensions_text: String::new(),
            local_addresses: String::new(),
        };
        assert!(matches!(store.save(&form), Err(NetRemoteError::Io(_))));
    }

    #[test]
    fn select_format_out_of_range_is_ignored() {
        let store = store_over(Arc::new(MemoryBackend::new()));
        let mut form = store.load().expect("load");
        let before = form.clone();
        assert!(store.select_format(&mut form, store.catalog().len()).is_none());
        assert_eq!(form, before);
    }

    #[test]
    fn encoder_options_group_follows_selection() {
        let store = store_over(Arc::new(MemoryBackend::new()));
        let form = store.load().expect("load");
        assert_eq!(
            store.encoder_options_group(&form).as_deref(),
            Some("Transcoder/vorbisenc/NetworkRemote")
        );
    }

    #[test]
    fn foreign_json_values_do_not_reset_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"network_remote":{"use_remote":true,"port":8080,"auth_code":12345,"comment":null}}"#,
        )
        .expect("write");

        let store = store_over(Arc::new(JsonFileBackend::open(&path).expect("open")));
        let s = store.load().expect("load").settings;
        assert!(s.enabled);
        assert_eq!(s.port, 8080);
        assert_eq!(s.auth_code, 12345);

        let reopened = JsonFileBackend::open(&path).expect("reopen");
        assert_eq!(
            reopened.get(SETTINGS_GROUP, keys::PORT).expect("get"),
            Some(SettingValue::Int(8080))
        );
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let first_code = {
            let store = store_over(Arc::new(JsonFileBackend::open(&path).expect("open")));
            let mut form = store.load().expect("load");
            form.settings.enabled = true;
            form.extensions_text = "flac,opus".into();
            store.save(&form).expect("save");
            form.settings.auth_code
        };

        let store = store_over(Arc::new(JsonFileBackend::open(&path).expect("reopen")));
        let form = store.load().expect("load");
        assert!(form.settings.enabled);
        assert_eq!(form.settings.auth_code, first_code);
        assert_eq!(form.settings.allowed_extensions, vec!["flac", "opus"]);
    }
}
