use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pagepulse::config::{generate_sample_config, ConfigLoader};
use pagepulse::logging::init_logging;
use pagepulse::validation::parse_target;
use pagepulse::{HttpServer, ReportService};

#[derive(Parser, Debug)]
#[command(name = "pagepulse", version, about = "Web page performance analyzer")]
struct Cli {
    /// Configuration file (defaults to pagepulse.toml or config/pagepulse.toml)
    #[arg(short, long, global = true, env = "PAGEPULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level or filter expression
    #[arg(long, global = true, env = "PAGEPULSE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Listen address, overrides server.bind_addr
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Analyse one URL and print the report as JSON
    Analyze {
        url: String,
        /// Synthetic demo report, no network access
        #[arg(long)]
        demo: bool,
        /// Print a plain-text summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Write a sample configuration file
    InitConfig {
        #[arg(default_value = "pagepulse.toml.example")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::InitConfig { path }) = &cli.command {
        generate_sample_config(path)?;
        println!("Wrote sample configuration to {}", path.display());
        return Ok(());
    }

    let mut config = ConfigLoader::new()
        .load_from_file(cli.config.as_deref())
        .load_from_env()
        .build()?;

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(Command::Serve { bind: Some(bind) }) = &cli.command {
        config.server.bind_addr = bind.clone();
    }

    config.validate().context("Invalid configuration")?;
    let _log_guard = init_logging(&config.logging)?;

    let reports = ReportService::from_config(&config).context("Failed to set up analysis")?;

    match cli.command {
        Some(Command::Analyze { url, demo, summary }) => {
            let url = parse_target(&url)?;
            let report = if demo {
                reports.demo_report(&url)
            } else {
                reports.analyze_report(&url).await?
            };
            if summary {
                println!("{}", report.summary());
            } else {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        _ => {
            HttpServer::new(config.server, reports).serve().await?;
        }
    }

    Ok(())
}
