use colored::Colorize;

use crate::application::export::metric_stats;
use crate::application::services::session::SessionSnapshot;
use crate::presentation::cli::formatters::status_fmt::{print_section_header, severity_label};

/// Prints the end-of-session report to the terminal: state, alerts,
/// recommendations, then per-metric statistics.
pub fn print_session_summary(snapshot: &SessionSnapshot) {
    println!();
    println!("{}", "vitals — Bilan de session".bold().cyan());
    println!("{}", "━".repeat(50));
    let peak = snapshot.peak_severity();
    println!(
        "État : {} — {} échantillon(s), {} alerte(s)",
        snapshot.state,
        snapshot.samples.len(),
        snapshot.alerts.len()
    );
    println!("Sévérité maximale : {} {}", peak.emoji(), severity_label(peak));

    print_section_header("\n💡 Recommandations");
    if snapshot.recommendations.is_empty() {
        println!("  Aucune recommandation.");
    }
    for rec in &snapshot.recommendations {
        println!(
            "  {} ({}) {}",
            severity_label(rec.priority),
            rec.category,
            rec.text
        );
    }

    print_section_header("\n🚨 Alertes");
    if snapshot.alerts.is_empty() {
        println!("  {}", "Aucune alerte.".green());
    }
    for alert in &snapshot.alerts {
        println!(
            "  {} {} {}",
            alert.timestamp.format("%H:%M:%S"),
            severity_label(alert.severity),
            alert.message
        );
    }

    print_section_header("\n📈 Statistiques");
    let stats = metric_stats(snapshot);
    if stats.is_empty() {
        println!("  Aucun échantillon.");
    }
    for (metric, s) in &stats {
        println!(
            "  {:<22} min {:.1}{u}  moy {:.1}{u}  max {:.1}{u}",
            metric.label(),
            s.min,
            s.avg,
            s.max,
            u = metric.unit()
        );
    }
}
