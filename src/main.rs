use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contest_dash::api::{build_router, state::AppState};
use contest_dash::calculate::FilterSelection;
use contest_dash::config::AppConfig;
use contest_dash::models::{Column, DashboardViews};
use contest_dash::present::{present_dashboard, JsonPresenter, TextPresenter};
use contest_dash::storage::{
    load_csv_path, require_submissions, write_csv, EXPECTED_FORMAT, EXPORT_FILENAME,
};

#[derive(Parser)]
#[command(name = "contest-dash")]
#[command(about = "Coding-contest submission log analytics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compute every dashboard view for a submission log
    Report {
        /// Submission log CSV
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Write the rows matching a problem/result filter to CSV
    Export {
        /// Submission log CSV
        #[arg(long)]
        input: PathBuf,

        /// Keep only this problem (repeatable; default: all)
        #[arg(long = "problem")]
        problems: Vec<String>,

        /// Keep only this result (repeatable; default: all)
        #[arg(long = "result")]
        results: Vec<String>,

        /// Output file
        #[arg(long, default_value = EXPORT_FILENAME)]
        output: PathBuf,
    },

    /// Print the expected CSV format
    Format,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr)))
        .init();
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting contest-dash v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let state = AppState::new(&config);
            let app = build_router(state);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Report { input, format } => {
            let table = load_csv_path(&input)
                .and_then(require_submissions)
                .with_context(|| format!("Failed to load {:?}", input))?;
            let views = DashboardViews::compute(&table, &config.analysis);

            let stdout = io::stdout();
            match format {
                ReportFormat::Text => {
                    let mut presenter = TextPresenter::new(stdout.lock());
                    present_dashboard(&mut presenter, &views)?;
                }
                ReportFormat::Json => {
                    let mut presenter = JsonPresenter::new();
                    present_dashboard(&mut presenter, &views)?;
                    let mut out = stdout.lock();
                    serde_json::to_writer_pretty(&mut out, &presenter.into_value())?;
                    writeln!(out)?;
                }
            }
        }
        Commands::Export {
            input,
            problems,
            results,
            output,
        } => {
            let table = load_csv_path(&input)
                .and_then(require_submissions)
                .with_context(|| format!("Failed to load {:?}", input))?;
            let selection = FilterSelection {
                problems: non_empty(problems),
                results: non_empty(results),
            };
            let filtered = selection.apply(&table);

            let file = std::fs::File::create(&output)
                .with_context(|| format!("Failed to create {:?}", output))?;
            write_csv(&filtered, io::BufWriter::new(file))?;
            println!(
                "Wrote {} of {} rows to {}",
                filtered.len(),
                table.len(),
                output.display()
            );
        }
        Commands::Format => {
            println!("Please upload a CSV file to begin analysis.\n");
            println!("Required columns:");
            for column in Column::REQUIRED {
                println!("  - {}", column);
            }
            println!("\nExpected CSV Format:\n{}", EXPECTED_FORMAT);
        }
    }

    Ok(())
}
