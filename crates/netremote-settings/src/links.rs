// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where to get a remote-control client.

/// Client apps advertised next to the remote settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteClientLink {
    /// Android remote.
    PlayStore,
    /// Second Android remote.
    PlayStoreAlt,
    /// iOS remote.
    AppleStore,
    /// Cross-platform desktop remote (Linux, macOS, Windows).
    DesktopReleases,
}

impl RemoteClientLink {
    pub const ALL: [Self; 4] = [
        Self::PlayStore,
        Self::PlayStoreAlt,
        Self::AppleStore,
        Self::DesktopReleases,
    ];

    pub fn url(&self) -> &'static str {
        match self {
            Self::PlayStore => {
                "https://play.google.com/store/apps/details?id=de.qspool.clementineremote"
            }
            Self::PlayStoreAlt => {
                "https://play.google.com/store/apps/details?id=fr.mbruel.ClementineRemote"
            }
            Self::AppleStore => "https://apps.apple.com/fr/app/clemremote/id1541922045",
            Self::DesktopReleases => "https://github.com/mbruel/ClementineRemote/releases/latest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PlayStore => "Android (Google Play)",
            Self::PlayStoreAlt => "Android, alternative client (Google Play)",
            Self::AppleStore => "iOS (App Store)",
            Self::DesktopReleases => "Desktop (GitHub releases)",
        }
    }
}
