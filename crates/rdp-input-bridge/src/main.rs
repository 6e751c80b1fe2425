//! rdp-input-replay: replays recorded browser events through the adapter.
//!
//! Reads a JSON-lines recording of DOM events, feeds it to a
//! [`SessionAdapter`] connected to the in-process loopback engine, and prints
//! every input transaction the adapter submitted, one JSON array per line.
//! Useful for checking keyboard layouts and dispatch settings without a
//! remote machine.
//!
//! # Usage
//!
//! ```text
//! rdp-input-replay --events <FILE> [OPTIONS]
//!
//! Options:
//!   --events        <FILE>  JSON-lines recording of browser events
//!   --settings      <FILE>  TOML settings file (missing file = defaults)
//!   --username      <NAME>  [default: replay]
//!   --password      <PASS>  [default: ""]
//!   --proxy-address <URL>   [default: ws://127.0.0.1:7171/jet/rdp]
//!   --unicode               Force Unicode keyboard mode on
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Flag              |
//! |-----------------------|-------------------|
//! | `RDP_REPLAY_EVENTS`   | `--events`        |
//! | `RDP_REPLAY_SETTINGS` | `--settings`      |
//! | `RDP_USERNAME`        | `--username`      |
//! | `RDP_PASSWORD`        | `--password`      |
//! | `RDP_PROXY_ADDRESS`   | `--proxy-address` |
//!
//! Log output goes to stderr; `RUST_LOG` overrides the settings file's
//! `[logging] level`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rdp_input_bridge::application::SessionAdapter;
use rdp_input_bridge::domain::Config;
use rdp_input_bridge::infrastructure::{
    load_recording, load_settings, AdapterSettings, HeadlessSurface, LoopbackConnector,
    SurfaceErrorReporter,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Replays recorded browser events against a loopback session.
#[derive(Debug, Parser)]
#[command(
    name = "rdp-input-replay",
    about = "Replay recorded browser input through the RDP input adapter",
    version
)]
struct Cli {
    /// JSON-lines file with one browser event per line.
    #[arg(long, env = "RDP_REPLAY_EVENTS")]
    events: PathBuf,

    /// TOML settings file.
    #[arg(long, env = "RDP_REPLAY_SETTINGS")]
    settings: Option<PathBuf>,

    #[arg(long, default_value = "replay", env = "RDP_USERNAME")]
    username: String,

    #[arg(long, default_value = "", env = "RDP_PASSWORD", hide_env_values = true)]
    password: String,

    /// Gateway URL handed to the engine.
    #[arg(long, default_value = "ws://127.0.0.1:7171/jet/rdp", env = "RDP_PROXY_ADDRESS")]
    proxy_address: String,

    /// Send printable keys as Unicode events, regardless of the settings file.
    #[arg(long)]
    unicode: bool,
}

impl Cli {
    fn load_settings(&self) -> anyhow::Result<AdapterSettings> {
        match &self.settings {
            Some(path) => load_settings(path)
                .with_context(|| format!("loading settings from {}", path.display())),
            None => Ok(AdapterSettings::default()),
        }
    }

    fn connection_config(&self, settings: &AdapterSettings) -> Config {
        Config::new(&self.username, &self.password, &self.proxy_address)
            .with_desktop_size(settings.desktop_size())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.load_settings()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .init();

    let events = load_recording(&cli.events)
        .with_context(|| format!("reading recording {}", cli.events.display()))?;
    info!(events = events.len(), path = %cli.events.display(), "loaded recording");

    let connector = Arc::new(LoopbackConnector::default());
    let surface = Arc::new(HeadlessSurface::default());
    let reporter = Arc::new(SurfaceErrorReporter::new(surface.clone()));
    let mut adapter = SessionAdapter::new(connector.clone(), surface, reporter);

    adapter.set_keyboard_unicode_mode(cli.unicode || settings.keyboard.unicode_mode);
    adapter.set_enable_clipboard(settings.clipboard.enabled);
    adapter.set_enable_auto_clipboard(settings.clipboard.auto_sync);

    let handle = adapter
        .connect(cli.connection_config(&settings))
        .await
        .context("connecting to the loopback engine")?;

    // A recording starts with the page focused; explicit blur/focus events
    // in the file still apply.
    adapter.set_focused(true);
    for event in &events {
        adapter.dispatch(event);
    }

    let session = connector.last_session();
    adapter.shutdown();
    let termination = handle.run().await.context("running the loopback session")?;

    let transactions = session.map(|s| s.transactions()).unwrap_or_default();
    for transaction in &transactions {
        println!(
            "{}",
            serde_json::to_string(transaction).context("serializing a transaction")?
        );
    }

    info!(
        transactions = transactions.len(),
        reason = termination.reason(),
        "replay finished"
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};
    use rdp_input_core::DesktopSize;

    /// Parses `args` with every `env` fallback removed, so results do not
    /// depend on the calling shell.
    fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&str>))
            .try_get_matches_from(args)?;
        Cli::from_arg_matches(&matches)
    }

    fn parse(args: &[&str]) -> Cli {
        try_parse(args).unwrap()
    }

    #[test]
    fn test_cli_requires_events() {
        let result = try_parse(&["rdp-input-replay"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&["rdp-input-replay", "--events", "in.jsonl"]);
        assert_eq!(cli.events, PathBuf::from("in.jsonl"));
        assert!(!cli.unicode);
        assert!(cli.settings.is_none());
        assert_eq!(cli.username, "replay");
        assert_eq!(cli.proxy_address, "ws://127.0.0.1:7171/jet/rdp");
    }

    #[test]
    fn test_parse_ignores_environment() {
        // Arrange
        std::env::set_var("RDP_USERNAME", "envuser");

        // Act
        let cli = parse(&["rdp-input-replay", "--events", "in.jsonl"]);
        std::env::remove_var("RDP_USERNAME");

        // Assert
        assert_eq!(cli.username, "replay");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = parse(&[
            "rdp-input-replay",
            "--events",
            "in.jsonl",
            "--username",
            "alice",
            "--password",
            "x",
            "--proxy-address",
            "wss://host/rdpproxy/",
            "--unicode",
        ]);

        assert_eq!(cli.username, "alice");
        assert_eq!(cli.password, "x");
        assert_eq!(cli.proxy_address, "wss://host/rdpproxy/");
        assert!(cli.unicode);
    }

    #[test]
    fn test_connection_config_uses_settings_desktop_size() {
        // Arrange
        let cli = parse(&["rdp-input-replay", "--events", "in.jsonl", "--username", "bob"]);
        let mut settings = AdapterSettings::default();
        settings.session.desktop_width = Some(1280);
        settings.session.desktop_height = Some(1024);

        // Act
        let config = cli.connection_config(&settings);

        // Assert
        assert_eq!(config.username, "bob");
        assert_eq!(config.desktop_size, Some(DesktopSize::new(1280, 1024)));
    }

    #[test]
    fn test_missing_settings_file_yields_defaults() {
        let cli = parse(&[
            "rdp-input-replay",
            "--events",
            "in.jsonl",
            "--settings",
            "/nonexistent/settings.toml",
        ]);

        assert_eq!(cli.load_settings().unwrap(), AdapterSettings::default());
    }
}
