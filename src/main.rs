use std::path::PathBuf;
use std::sync::LazyLock;

use clap::Parser;
use ui::constants::ASCII_LOGO;

mod app;
mod commands;
mod integrations;
mod ui;

use anyhow::Result;
use commands::config::model::ConfigCommand;
use commands::run::RunCommand;
use dirs::{config_dir, home_dir, state_dir};

/// Configuration file path following the XDG Base Directory specification.
/// Prefers ~/.config/linkrs/config.toml but falls back to the legacy ~/.linkrs
/// if only that one exists.
static CONFIG_FILE: LazyLock<PathBuf> = LazyLock::new(|| {
    let home = home_dir().unwrap_or_default();
    let xdg_config = config_dir()
        .unwrap_or_else(|| home.join(".config"))
        .join("linkrs")
        .join("config.toml");

    if xdg_config.exists() {
        return xdg_config;
    }

    let legacy_config = home.join(".linkrs");
    if legacy_config.exists() {
        legacy_config
    } else {
        xdg_config
    }
});

/// Get the state directory path using XDG Base Directory specification
/// Used for logs
pub fn get_state_dir() -> PathBuf {
    state_dir()
        .unwrap_or_else(|| home_dir().unwrap_or_default().join(".local").join("state"))
        .join("linkrs")
}

#[derive(Parser)]
#[clap(name="linkrs", bin_name="linkrs", version, about, before_help=ASCII_LOGO)]
struct LinkrsApp {
    #[clap(subcommand)]
    command: Option<LinkrsCommand>,
}

#[derive(Parser)]
enum LinkrsCommand {
    Run(RunCommand),
    #[clap(subcommand)]
    Config(ConfigCommand),
}

impl LinkrsApp {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Some(LinkrsCommand::Run(cmd)) => cmd.run().await,
            Some(LinkrsCommand::Config(cmd)) => cmd.run(),
            None => RunCommand::default().run().await,
        }
    }
}

// reqwest is built without a default rustls provider; install ring once
fn init_crypto_provider() {
    use std::sync::Once;
    static CRYPTO_PROVIDER_INIT: Once = Once::new();

    CRYPTO_PROVIDER_INIT.call_once(|| {
        // Fails only when a provider is already installed
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    init_crypto_provider();

    let app = LinkrsApp::parse();
    app.run().await?;
    std::process::exit(0);
}
