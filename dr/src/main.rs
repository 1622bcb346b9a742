use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use docreader::app::EXIT_RUNTIME_FAILURE;
use docreader::cli::Cli;
use docreader::config::Config;
use docreader::{Renderer, run};

fn parse_level(level: &str) -> tracing::Level {
    match level.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        _ => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", level);
            tracing::Level::WARN
        }
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > WARN
    let level = cli_log_level
        .or(config_log_level)
        .map(parse_level)
        .unwrap_or(tracing::Level::WARN);

    // stdout carries document text only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("{}", e))?;

    debug!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn try_main(cli: &Cli) -> Result<u8> {
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(root) = &cli.root {
        config.content_root = Some(root.clone());
    }
    info!(content_root = ?config.content_root, "docreader starting");

    let renderer = Renderer::new(config.color && std::io::stdout().is_terminal());
    run(
        cli,
        &config,
        renderer,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // exit code 1 is reserved for missing topics
    match try_main(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:?}", e);
            ExitCode::from(EXIT_RUNTIME_FAILURE)
        }
    }
}
