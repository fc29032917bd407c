use std::time::Duration;

use crate::application::export::{export_summary, export_timeseries};
use crate::application::services::shared::SharedSession;
use crate::domain::ports::export::ExportSink;
use crate::domain::ports::sampler::HardwareSampler;
use crate::presentation::cli::formatters::summary_fmt::print_session_summary;

/// Drives a monitoring session to completion at the configured tick
/// interval.
///
/// The loop ends when the session reaches its wall-clock duration
/// limit, or early on SIGINT (Ctrl+C) via [`tokio::signal::ctrl_c()`],
/// in which case the session is stopped and the data gathered so far is
/// kept. Failed sensor reads are absorbed by the session itself; a tick
/// error here means the session left the running state, so the loop
/// ends.
///
/// # Errors
///
/// Returns an error if the session cannot start or a requested export
/// fails.
pub async fn run_monitor(
    session: &SharedSession,
    sampler: &dyn HardwareSampler,
    sink: &dyn ExportSink,
    duration_minutes: u64,
    tick_interval: Duration,
    export: bool,
) -> anyhow::Result<()> {
    session.start(duration_minutes, tick_interval)?;
    println!(
        "Session de {duration_minutes} min démarrée (tick {}s). Ctrl+C pour arrêter.",
        tick_interval.as_secs()
    );

    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match session.tick(sampler) {
                    Ok(report) if report.completed => {
                        tracing::info!("Durée atteinte, fin de session");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("Erreur pendant le tick : {e}");
                        break;
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Signal d'arrêt reçu, fermeture propre...");
                println!("\nArrêt de la session...");
                if let Err(e) = session.stop() {
                    tracing::debug!("Arrêt ignoré : {e}");
                }
                break;
            }
        }
    }

    let snapshot = session.snapshot();
    print_session_summary(&snapshot);

    if export {
        let csv_path = export_timeseries(&snapshot, sink)?;
        let report_path = export_summary(&snapshot, sink)?;
        println!("Série temporelle : {}", csv_path.display());
        println!("Rapport : {}", report_path.display());
    }

    Ok(())
}
