// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reload notification for a running remote-control service.
//
// The service owns the receiving half and re-reads the persisted settings
// whenever a request arrives. Sending never blocks, so the settings surface
// can notify from its own (synchronous) thread.

use netremote_core::error::{NetRemoteError, Result};
use tokio::sync::mpsc;
use tracing::debug;

use crate::traits::RemoteControl;

/// Message asking the remote-control service to re-read its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadRequest;

/// Sending half of the service's reload channel.
#[derive(Debug, Clone)]
pub struct ReloadChannel {
    tx: mpsc::UnboundedSender<ReloadRequest>,
}

impl ReloadChannel {
    /// Create a channel; hand the receiver to the remote-control service.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ReloadRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl RemoteControl for ReloadChannel {
    fn notify_reload(&self) -> Result<()> {
        self.tx
            .send(ReloadRequest)
            .map_err(|_| NetRemoteError::ReloadUnavailable)?;
        debug!("reload request sent to remote control service");
        Ok(())
    }
}
