//! Dashboard Metrics — synthetic marketing analytics for the dashboard.
//!
//! Serves the metrics API, or prints a single snapshot, series, comparison,
//! or dashboard overview for a filter and exits.

use clap::{Args, Parser, Subcommand};
use dashboard_api::ApiServer;
use dashboard_core::config::AppConfig;
use dashboard_core::FilterSelection;
use dashboard_reporting::build_overview;
use dashboard_synth::{MetricsSynthesizer, SeriesSummary};
use serde::Serialize;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "dashboard-metrics")]
#[command(about = "Synthetic Google Ads and analytics metrics for the marketing dashboard")]
#[command(version)]
struct Cli {
    /// Optional TOML config file (environment variables still apply)
    #[arg(long, env = "DASHBOARD_CONFIG")]
    config: Option<String>,

    /// Seed the sampler for reproducible output (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// HTTP port (overrides config)
        #[arg(long, env = "DASHBOARD__API__HTTP_PORT")]
        http_port: Option<u16>,

        /// Bind address (overrides config)
        #[arg(long, env = "DASHBOARD__API__HOST")]
        host: Option<String>,

        /// Skip the Prometheus exporter
        #[arg(long, default_value_t = false)]
        no_metrics: bool,
    },
    /// Print one funnel snapshot as JSON
    Snapshot(FilterArgs),
    /// Print the performance-over-time series as JSON
    Series(FilterArgs),
    /// Print the current vs previous period comparison as JSON
    Compare(FilterArgs),
    /// Print the full dashboard overview
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,

        /// Human-readable table instead of JSON
        #[arg(long, default_value_t = false)]
        text: bool,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long, default_value = "all")]
    region: String,

    #[arg(long, default_value = "all")]
    campaign_type: String,

    #[arg(long, default_value = "today")]
    time_period: String,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        FilterSelection::new(
            self.region.as_str(),
            self.campaign_type.as_str(),
            self.time_period.as_str(),
        )
    }
}

#[derive(Serialize)]
struct SeriesOutput {
    filter: FilterSelection,
    points: Vec<dashboard_core::TimeSeriesPoint>,
    summary: SeriesSummary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so one-shot commands keep stdout clean for JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dashboard_metrics=info,dashboard_api=info,tower_http=info".into()
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(seed) = cli.seed {
        config.synth.seed = Some(seed);
    }

    let command = cli.command.unwrap_or(Command::Serve {
        http_port: None,
        host: None,
        no_metrics: false,
    });

    match command {
        Command::Serve {
            http_port,
            host,
            no_metrics,
        } => {
            if let Some(port) = http_port {
                config.api.http_port = port;
            }
            if let Some(host) = host {
                config.api.host = host;
            }
            if no_metrics {
                config.metrics.enabled = false;
            }
            serve(config).await
        }
        Command::Snapshot(args) => {
            let mut synth = MetricsSynthesizer::from_config(config.synth)?;
            print_json(&synth.derive_snapshot(&args.selection())?)
        }
        Command::Series(args) => {
            let mut synth = MetricsSynthesizer::from_config(config.synth)?;
            let filter = args.selection();
            let points = synth.generate_series(&filter)?;
            let summary = SeriesSummary::from_points(&points);
            print_json(&SeriesOutput {
                filter,
                points,
                summary,
            })
        }
        Command::Compare(args) => {
            let mut synth = MetricsSynthesizer::from_config(config.synth)?;
            print_json(&synth.compare_periods(&args.selection())?)
        }
        Command::Dashboard { filter, text } => {
            let mut synth = MetricsSynthesizer::from_config(config.synth)?;
            let overview = build_overview(&mut synth, &filter.selection())?;
            if text {
                print!("{}", overview.render_text());
                Ok(())
            } else {
                print_json(&overview)
            }
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!("Dashboard metrics starting up");
    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        seeded = config.synth.seed.is_some(),
        "Configuration loaded"
    );

    let synth = MetricsSynthesizer::from_config(config.synth.clone())?;
    let api_server = ApiServer::new(config, synth);

    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Dashboard metrics is ready to serve traffic");

    // Blocks until shutdown
    api_server.start_http().await?;

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
