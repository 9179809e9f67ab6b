use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::api::run_http_server;
use crate::config::{ConfigError, ProgramConfig};
use crate::core::{RawScenario, StatusReport};
use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "tierlift",
    about = "Loyalty tier status calculator (FX-normalized spend + partner multiplier scenarios)"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "TIERLIFT_LOG_LEVEL",
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error); RUST_LOG overrides"
    )]
    pub log_level: String,
    #[arg(
        long,
        global = true,
        env = "TIERLIFT_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact
    )]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON status API
    Serve(ServeArgs),
    /// Calculate tier status for one scenario
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(
        long,
        env = "TIERLIFT_CONFIG",
        help = "JSON file with region and tier tables; defaults to the built-in reference tables"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "TIERLIFT_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(short, long, env = "TIERLIFT_PORT", default_value_t = 8080)]
    pub port: u16,
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[arg(long, default_value = "US", help = "Region code, e.g. US, EU, UK, JP")]
    pub region: String,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Qualifying spend in local currency"
    )]
    pub current_spend: Option<String>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Partner multiplier, defaults to 1.0"
    )]
    pub multiplier: Option<String>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Simulated partner spend in local currency, defaults to 0"
    )]
    pub extra_spend: Option<String>,
    #[arg(
        long,
        conflicts_with_all = ["current_spend", "multiplier", "extra_spend"],
        help = "Use the example scenario (EU, 1800 spend, 1.5x on 400)"
    )]
    pub example: bool,
    #[arg(long, help = "Print the full report as JSON")]
    pub json: bool,
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl StatusArgs {
    fn raw_scenario(&self) -> RawScenario {
        if self.example {
            return RawScenario::example();
        }
        RawScenario {
            region: self.region.clone(),
            current_spend: self.current_spend.clone(),
            partner_multiplier: self.multiplier.clone(),
            extra_spend: self.extra_spend.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidScenario(String),
}

pub async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Serve(args) => {
            let engine = ProgramConfig::load_or_reference(args.config.config.as_deref())?
                .into_engine()?;
            run_http_server(SocketAddr::new(args.host, args.port), engine).await?;
            Ok(())
        }
        Command::Status(args) => {
            let engine = ProgramConfig::load_or_reference(args.config.config.as_deref())?
                .into_engine()?;
            let report = engine.status_report(&args.raw_scenario());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_text(&report));
            }
            match report.error_reason {
                Some(reason) if !report.valid => Err(CliError::InvalidScenario(reason)),
                _ => Ok(()),
            }
        }
    }
}

pub fn render_text(report: &StatusReport) -> String {
    match &report.status {
        Some(status) => {
            let mut lines = vec![status.headline.clone(), String::new()];
            lines.extend(status.breakdown.iter().cloned());
            lines.join("\n")
        }
        None => format!(
            "Unable to calculate - {}",
            report.error_reason.as_deref().unwrap_or("invalid input")
        ),
    }
}
