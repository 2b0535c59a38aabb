// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local address discovery for display next to the port setting.
//
// Only IPv4 is reported: the remote's mDNS announcer does not speak IPv6 yet,
// so showing v6 addresses would advertise endpoints clients cannot find.

use std::net::IpAddr;

use netremote_core::error::{NetRemoteError, Result};
use tracing::{debug, warn};

use crate::traits::AddressSource;

/// Separator between addresses in the display string.
const ADDRESS_SEPARATOR: &str = ", ";

/// Reads interface addresses from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAddresses;

impl AddressSource for SystemAddresses {
    fn host_addresses(&self) -> Result<Vec<IpAddr>> {
        let interfaces = if_addrs::get_if_addrs()
            .map_err(|e| NetRemoteError::Interfaces(e.to_string()))?;
        Ok(interfaces.iter().map(|iface| iface.ip()).collect())
    }
}

/// Turns the host's addresses into the "reach me at" display string.
pub struct NetworkInterfaceScanner {
    source: Box<dyn AddressSource>,
}

impl NetworkInterfaceScanner {
    pub fn new(source: impl AddressSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Scanner backed by the operating system's interface list.
    pub fn system() -> Self {
        Self::new(SystemAddresses)
    }

    /// Non-loopback IPv4 addresses joined with `", "`, in enumeration order.
    ///
    /// An enumeration failure is logged and reported as no addresses.
    pub fn scan(&self) -> String {
        match self.source.host_addresses() {
            Ok(addresses) => {
                let text = format_addresses(&addresses);
                debug!(addresses = %text, "local addresses scanned");
                text
            }
            Err(e) => {
                warn!(error = %e, "could not enumerate local addresses");
                String::new()
            }
        }
    }
}

/// Keep IPv4 addresses outside 127.0.0.0/8 and join them for display.
pub fn format_addresses(addresses: &[IpAddr]) -> String {
    addresses
        .iter()
        .filter_map(|addr| match addr {
            IpAddr::V4(v4) if !v4.is_loopback() => Some(v4.to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(ADDRESS_SEPARATOR)
}
