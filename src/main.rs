use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use vitals::application::config::AppConfig;
use vitals::application::services::session::MonitoringSession;
use vitals::application::services::shared::SharedSession;
use vitals::domain::ports::clock::Clock;
use vitals::domain::ports::sampler::HardwareSampler;
use vitals::domain::value_objects::thresholds::ThresholdPolicy;
use vitals::infrastructure::clock::SystemClock;
use vitals::infrastructure::export::file_sink::FileExportSink;
use vitals::infrastructure::samplers::sysinfo_sampler::SysinfoSampler;
use vitals::presentation::cli::app::{Cli, Commands};
use vitals::presentation::cli::commands::monitor::run_monitor;
use vitals::presentation::cli::commands::status::run_status;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  VITALS — Hardware Telemetry Monitor".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };

    // Manual DI — main.rs is the only place that knows concrete types
    let sampler = SysinfoSampler::new();
    let policy = ThresholdPolicy::from(&config.thresholds);

    // Bare invocation starts a session with config defaults
    let command = cli.command.unwrap_or(Commands::Monitor {
        duration: None,
        interval: None,
        export: false,
        output_dir: None,
    });

    match command {
        Commands::Status { json } => {
            // First cpu_usage reading needs a short settle delay
            tokio::time::sleep(Duration::from_millis(500)).await;
            run_status(&sampler, &policy, json)?;
        }
        Commands::Monitor {
            duration,
            interval,
            export,
            output_dir,
        } => {
            print_banner();

            let tracked = sampler.supported();
            if tracked.is_empty() {
                anyhow::bail!("Aucun capteur disponible sur cette machine");
            }
            tracing::info!(
                "Métriques suivies : {}",
                tracked
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let duration_minutes = duration.unwrap_or(config.general.duration_minutes);
            let tick_interval = Duration::from_secs(
                interval
                    .unwrap_or(config.general.tick_interval_secs)
                    .max(1),
            );

            let clock: Arc<dyn Clock> = Arc::new(SystemClock);
            let session = SharedSession::new(MonitoringSession::new(policy, tracked, clock));
            let sink = FileExportSink::new(
                output_dir.unwrap_or_else(|| config.export.output_dir.clone()),
            );

            run_monitor(
                &session,
                &sampler,
                &sink,
                duration_minutes,
                tick_interval,
                export,
            )
            .await?;
        }
    }

    Ok(())
}
