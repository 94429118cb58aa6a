//! Fee burn explorer daemon — serves the aggregator endpoint and dashboard.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use feeburn_rpc::{ServeMode, ServerConfig};
use feeburn_utils::{LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "feeburn-daemon", about = "Canton Network fee burn explorer")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "FEEBURN_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind the HTTP server to.
    #[arg(long, env = "FEEBURN_BIND")]
    bind: Option<String>,

    /// Dashboard data mode: "demo", "live" or "remote".
    #[arg(long, env = "FEEBURN_MODE")]
    mode: Option<ServeMode>,

    /// Base URL of the upstream scan API.
    #[arg(long, env = "FEEBURN_SCAN_URL")]
    scan_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error" or "off".
    #[arg(long, env = "FEEBURN_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FEEBURN_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

impl Cli {
    /// Apply CLI/env values over `base`.
    fn merge(self, base: ServerConfig) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind.unwrap_or(base.bind_addr),
            mode: self.mode.unwrap_or(base.mode),
            scan_url: self.scan_url.unwrap_or(base.scan_url),
            log_level: self
                .log_level
                .map_or(base.log_level, |level| level.as_str().to_string()),
            log_format: self
                .log_format
                .map_or(base.log_format, |format| format.as_str().to_string()),
            ..base
        }
    }
}

/// Validate the configured log format and level.
fn logging_settings(config: &ServerConfig) -> anyhow::Result<(LogFormat, LogLevel)> {
    let format = config
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!("log_format: {e}"))?;
    let level = config
        .log_level
        .parse()
        .map_err(|e: String| anyhow::anyhow!("log_level: {e}"))?;
    Ok((format, level))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => ServerConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    let config_path = cli.config.clone();
    let config = cli.merge(file_config);

    let (log_format, log_level) = logging_settings(&config)?;
    feeburn_utils::init_logging(log_format, log_level)?;

    if let Some(path) = config_path {
        tracing::info!("Loaded config from {}", path.display());
    }
    tracing::info!(
        "Starting fee burn explorer in {} mode on {}",
        config.mode.as_str(),
        config.bind_addr
    );

    feeburn_rpc::serve(config).await?;

    tracing::info!("fee burn explorer exited cleanly");
    Ok(())
}
