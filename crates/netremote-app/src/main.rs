// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Network remote settings — command-line front end.
//
// Entry point. Initialises logging and the settings service, then runs one
// command against the persisted network remote settings.

mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use netremote_core::error::Result;
use netremote_settings::{RemoteClientLink, RemoteSettingsForm};
use serde_json::json;

use services::settings_service::{BackendKind, SettingsService};

#[derive(Parser)]
#[command(name = "netremote", about = "Inspect and edit the network remote settings")]
struct Cli {
    /// Where the settings are persisted
    #[arg(long, value_enum, env = "NETREMOTE_BACKEND", default_value = "json")]
    backend: BackendKind,
    /// Directory holding the settings file (default: the user data directory)
    #[arg(long, env = "NETREMOTE_DATA_DIR")]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the settings, with defaults applied, as JSON
    Show,
    /// Write every setting out, defaults included
    Init,
    /// List the transcoding presets with their selector index
    Presets,
    /// List where to get a remote-control client
    Links,
    /// Select the output format by preset index
    SetFormat { index: usize },
    /// Replace the music extension whitelist (comma separated)
    SetExtensions { list: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut svc = SettingsService::init(cli.backend, cli.data_dir.as_deref());

    let outcome = match cli.command.unwrap_or(Command::Show) {
        Command::Show => show(&svc),
        Command::Init => init(&mut svc),
        Command::Presets => {
            presets(&svc);
            Ok(())
        }
        Command::Links => {
            links();
            Ok(())
        }
        Command::SetFormat { index } => set_format(&mut svc, index),
        Command::SetExtensions { list } => set_extensions(&mut svc, &list),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

/// Print the loaded settings and their display fields as JSON.
fn show(svc: &SettingsService) -> Result<()> {
    let form = svc.store.load()?;
    let report = json!({
        "settings": form.settings,
        "output_format": svc.store.selected_preset(&form).map(|p| p.label()),
        "encoder_options_group": svc.store.encoder_options_group(&form),
        "extensions": form.extensions_text,
        "local_addresses": form.local_addresses,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Load and immediately save, so every default is written out.
fn init(svc: &mut SettingsService) -> Result<()> {
    let form = svc.store.load()?;
    commit(svc, &form)
}

fn presets(svc: &SettingsService) {
    for (i, preset) in svc.store.catalog().all().iter().enumerate() {
        println!("{i:>2}  {:<32} {}", preset.label(), preset.codec_mimetype);
    }
}

fn links() {
    for link in RemoteClientLink::ALL {
        println!("{:<44} {}", link.label(), link.url());
    }
}

fn set_format(svc: &mut SettingsService, index: usize) -> Result<()> {
    let mut form = svc.store.load()?;
    match svc.store.select_format(&mut form, index) {
        Some(preset) => println!("output format: {}", preset.label()),
        None => {
            tracing::warn!(index, "no preset at that index, format unchanged");
            return Ok(());
        }
    }
    commit(svc, &form)
}

fn set_extensions(svc: &mut SettingsService, list: &str) -> Result<()> {
    let mut form = svc.store.load()?;
    form.extensions_text = list.to_owned();
    commit(svc, &form)?;
    let saved = svc.store.load()?;
    println!("extensions: {}", saved.extensions_text);
    Ok(())
}

fn commit(svc: &mut SettingsService, form: &RemoteSettingsForm) -> Result<()> {
    svc.store.save(form)?;
    let reloads = svc.pending_reloads();
    tracing::info!(reloads, "settings committed");
    Ok(())
}
