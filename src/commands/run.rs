use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::app::run_app;
use crate::app::state::App;
use crate::integrations::client::create_client;
use crate::integrations::config::LinkrsConfig;

pub const API_URL_ENV: &str = "LINKRS_API_URL";
pub const LOG_ENV: &str = "LINKRS_LOG";

#[derive(Parser, Debug, Default)]
pub struct RunCommand {
    #[clap(short, long)]
    pub file: Option<String>,
    /// Base URL of the integrations API
    #[clap(long, env = API_URL_ENV)]
    pub api_url: Option<String>,
}

impl RunCommand {
    pub async fn run(&self) -> Result<()> {
        if let Ok(log_level) = std::env::var(LOG_ENV) {
            setup_logging(&log_level)?;
        }

        let path = self.file.as_ref().map(PathBuf::from);
        let (config, mut errors) = match LinkrsConfig::from_file(path.as_ref()) {
            Ok(config) => (config, vec![]),
            Err(e) => {
                // Invalid config: show the problem in the TUI and continue with defaults
                let default_config = LinkrsConfig::new();
                (default_config, vec![format!("Configuration Error:\n\n{e:#}")])
            }
        };

        // `linkrs` without a subcommand never went through clap's env lookup
        let api_url = self
            .api_url
            .clone()
            .or_else(|| std::env::var(API_URL_ENV).ok());
        let client = match create_client(&config, api_url.as_deref()) {
            Ok(client) => client,
            Err(e) => {
                errors.push(format!("Invalid API URL, using the default:\n\n{e:#}"));
                create_client(&config, Some(crate::integrations::config::DEFAULT_API_URL))?
            }
        };

        // setup terminal (includes panic hooks) and run app
        let mut terminal = ratatui::init();
        let app = App::new_with_errors(config, errors);
        let result = run_app(&mut terminal, Arc::new(Mutex::new(app)), client).await;

        info!("Shutting down the terminal...");
        ratatui::restore();
        result
    }
}

fn setup_logging(log_level: &str) -> Result<()> {
    let log_dir = crate::get_state_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join(format!(
        "linkrs-debug-{}.log",
        chrono::Local::now().format("%Y%m%d%H%M%S")
    ));

    WriteLogger::init(
        parse_log_level(log_level),
        Config::default(),
        File::create(&log_file_path)?,
    )?;

    info!("Logging to: {}", log_file_path.display());
    Ok(())
}

fn parse_log_level(log_level: &str) -> LevelFilter {
    match log_level.to_lowercase().as_str() {
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("debug", LevelFilter::Debug)]
    #[case("TRACE", LevelFilter::Trace)]
    #[case("warn", LevelFilter::Warn)]
    #[case("error", LevelFilter::Error)]
    #[case("1", LevelFilter::Info)]
    fn test_parse_log_level(#[case] input: &str, #[case] expected: LevelFilter) {
        assert_eq!(parse_log_level(input), expected);
    }

    #[test]
    fn test_api_url_flag() {
        let cmd = RunCommand::try_parse_from(["run", "--api-url", "http://api.test:4000"]).unwrap();
        assert_eq!(cmd.api_url.as_deref(), Some("http://api.test:4000"));
        assert_eq!(cmd.file, None);
    }
}
