use colored::Colorize;
use serde::Serialize;

use crate::domain::classifier::classify;
use crate::domain::entities::sample::Sample;
use crate::domain::ports::sampler::HardwareSampler;
use crate::domain::value_objects::metric::MetricKind;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::ThresholdPolicy;
use crate::presentation::cli::formatters::status_fmt::{
    colorize_reading, print_section_header, progress_bar, severity_label,
};

/// One sensor reading with its classification, for display or JSON.
#[derive(Debug, Serialize)]
pub struct StatusLine {
    pub metric: MetricKind,
    pub value: f64,
    pub unit: String,
    pub severity: Severity,
}

/// Reads every supported sensor once and prints the classified values.
///
/// # Errors
///
/// Returns an error if JSON serialization fails. Individual sensor
/// failures are reported inline, not fatal.
pub fn run_status(
    sampler: &dyn HardwareSampler,
    policy: &ThresholdPolicy,
    json: bool,
) -> anyhow::Result<()> {
    let supported = sampler.supported();

    let mut lines = Vec::new();
    let mut failures = Vec::new();
    for metric in supported {
        match sampler.sample(metric) {
            Ok(sample) => lines.push(to_line(&sample, policy)),
            Err(e) => failures.push((metric, e.to_string())),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    println!("{}", "vitals — Lecture instantanée".bold().cyan());
    println!("{}", "━".repeat(50));

    if lines.is_empty() && failures.is_empty() {
        println!("Aucun capteur disponible sur cette machine.");
        return Ok(());
    }

    print_section_header("\n🌡️  Capteurs");
    for line in &lines {
        let reading = colorize_reading(line.value, &line.unit, line.severity);
        if line.unit == "%" {
            println!(
                "  {:<22} {} {}",
                line.metric.label(),
                progress_bar(line.value, 20),
                reading
            );
        } else {
            println!("  {:<22} {}", line.metric.label(), reading);
        }
        if line.severity > Severity::None {
            println!("    {}", severity_label(line.severity));
        }
    }

    for (metric, reason) in &failures {
        println!(
            "  {:<22} {}",
            metric.label(),
            format!("indisponible ({reason})").dimmed()
        );
    }

    Ok(())
}

fn to_line(sample: &Sample, policy: &ThresholdPolicy) -> StatusLine {
    let severity = classify(sample, policy).map_or(Severity::None, |a| a.severity);
    StatusLine {
        metric: sample.metric,
        value: sample.value,
        unit: sample.unit.clone(),
        severity,
    }
}
