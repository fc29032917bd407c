use std::collections::BTreeSet;

use crate::domain::entities::alert::Alert;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::entities::sample::Sample;
use crate::domain::value_objects::metric::MetricKind;
use crate::domain::value_objects::severity::Severity;

/// Number of trailing disk-usage samples examined by the trend rule.
pub const TREND_WINDOW: usize = 5;

/// Derives the deduplicated, prioritized recommendation list for a
/// session's alert/sample history.
///
/// Pure and idempotent: the same inputs always yield the same list, so
/// a per-tick recompute matches a full recompute. Ordering is priority
/// descending, then category ascending, then text ascending.
#[must_use]
pub fn aggregate(alerts: &[Alert], samples: &[Sample]) -> Vec<Recommendation> {
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
    let mut recommendations = Vec::new();

    let mut push = |rec: Recommendation, seen: &mut BTreeSet<(String, String)>| {
        if seen.insert((rec.category.clone(), rec.text.clone())) {
            recommendations.push(rec);
        }
    };

    // One recommendation per distinct (metric, severity >= High) pair.
    let mut pairs: BTreeSet<(MetricKind, Severity)> = BTreeSet::new();
    for alert in alerts {
        if alert.severity >= Severity::High {
            pairs.insert((alert.metric, alert.severity));
        }
    }
    for (metric, severity) in pairs {
        push(
            Recommendation {
                priority: severity,
                category: metric.family().to_string(),
                text: recommendation_text(metric, severity),
            },
            &mut seen,
        );
    }

    // Trend rule: disk usage rising across the session's tail.
    if disk_usage_trending_up(samples) {
        push(
            Recommendation {
                priority: Severity::Low,
                category: "storage".to_string(),
                text: "Surveiller la croissance de l'espace disque (tendance à la hausse sur la session)"
                    .to_string(),
            },
            &mut seen,
        );
    }

    // Preventive maintenance, always present.
    push(
        Recommendation {
            priority: Severity::Low,
            category: "maintenance".to_string(),
            text: "Nettoyage physique tous les 6 mois, pilotes à jour et sauvegardes régulières"
                .to_string(),
        },
        &mut seen,
    );

    recommendations.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.text.cmp(&b.text))
    });
    recommendations
}

/// True when the last `TREND_WINDOW` disk-usage samples are
/// non-decreasing and end strictly above where they started.
fn disk_usage_trending_up(samples: &[Sample]) -> bool {
    let disk: Vec<f64> = samples
        .iter()
        .filter(|s| s.metric == MetricKind::DiskUsage)
        .map(|s| s.value)
        .collect();
    if disk.len() < TREND_WINDOW {
        return false;
    }
    let tail = &disk[disk.len() - TREND_WINDOW..];
    let non_decreasing = tail.windows(2).all(|w| w[1] >= w[0]);
    non_decreasing && tail[TREND_WINDOW - 1] > tail[0]
}

/// Maintenance advice text. Deterministic function of
/// `(metric, severity)`.
#[must_use]
pub fn recommendation_text(metric: MetricKind, severity: Severity) -> String {
    let critical = severity >= Severity::Critical;
    let text = match (metric, critical) {
        (MetricKind::CpuTemp, false) => {
            "Nettoyer les ventilateurs et vérifier la pâte thermique du CPU"
        }
        (MetricKind::CpuTemp, true) => {
            "Arrêter les charges lourdes et inspecter d'urgence le refroidissement du CPU"
        }
        (MetricKind::GpuTemp, false) => {
            "Améliorer la ventilation du boîtier et dépoussiérer la carte graphique"
        }
        (MetricKind::GpuTemp, true) => {
            "Réduire la charge graphique et vérifier d'urgence le refroidissement du GPU"
        }
        (MetricKind::CpuUsage, false) => {
            "Fermer les programmes inutiles et vérifier les processus en arrière-plan"
        }
        (MetricKind::CpuUsage, true) => {
            "Identifier le processus fautif ; envisager une mise à niveau du processeur"
        }
        (MetricKind::GpuUsage, false) => {
            "Réduire les réglages graphiques et mettre à jour les pilotes"
        }
        (MetricKind::GpuUsage, true) => {
            "Interrompre la charge GPU et mettre à jour les pilotes"
        }
        (MetricKind::GpuVram, false) => "Fermer les applications gourmandes en VRAM",
        (MetricKind::GpuVram, true) => {
            "Réduire textures et résolutions : la VRAM est saturée"
        }
        (MetricKind::RamUsage, false) => {
            "Fermer les applications non utilisées et vérifier les fuites mémoire"
        }
        (MetricKind::RamUsage, true) => {
            "Ajouter de la RAM ou libérer de la mémoire immédiatement"
        }
        (MetricKind::DiskUsage, false) => {
            "Nettoyer les fichiers temporaires et désinstaller les programmes inutiles"
        }
        (MetricKind::DiskUsage, true) => {
            "Libérer de l'espace d'urgence ; déplacer des fichiers vers un disque externe"
        }
        (MetricKind::NetThroughput, false) => "Vérifier les transferts réseau en cours",
        (MetricKind::NetThroughput, true) => {
            "Identifier le processus saturant la bande passante"
        }
    };
    text.to_string()
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::classifier::alert_message;
    use chrono::Utc;

    fn alert(metric: MetricKind, severity: Severity, value: f64) -> Alert {
        Alert {
            metric,
            severity,
            value,
            threshold_crossed: 0.0,
            message: alert_message(metric, value, severity),
            timestamp: Utc::now(),
        }
    }

    fn disk_samples(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .map(|v| Sample::new(MetricKind::DiskUsage, *v, Utc::now()))
            .collect()
    }

    #[test]
    fn empty_session_yields_only_maintenance() {
        let recs = aggregate(&[], &[]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, "maintenance");
        assert_eq!(recs[0].priority, Severity::Low);
    }

    #[test]
    fn high_alert_yields_family_recommendation() {
        let alerts = vec![alert(MetricKind::CpuTemp, Severity::High, 78.0)];
        let recs = aggregate(&alerts, &[]);
        let thermal: Vec<&Recommendation> =
            recs.iter().filter(|r| r.category == "thermal").collect();
        assert_eq!(thermal.len(), 1);
        assert_eq!(thermal[0].priority, Severity::High);
    }

    #[test]
    fn low_alerts_do_not_produce_recommendations() {
        let alerts = vec![alert(MetricKind::GpuTemp, Severity::Low, 0.0)];
        let recs = aggregate(&alerts, &[]);
        assert!(recs.iter().all(|r| r.category != "thermal"));
    }

    #[test]
    fn repeated_alerts_deduplicate() {
        let alerts = vec![
            alert(MetricKind::RamUsage, Severity::Critical, 95.0),
            alert(MetricKind::RamUsage, Severity::Critical, 97.0),
            alert(MetricKind::RamUsage, Severity::Critical, 96.0),
        ];
        let recs = aggregate(&alerts, &[]);
        let memory: Vec<&Recommendation> =
            recs.iter().filter(|r| r.category == "memory").collect();
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn distinct_severities_for_same_metric_both_appear() {
        let alerts = vec![
            alert(MetricKind::RamUsage, Severity::High, 85.0),
            alert(MetricKind::RamUsage, Severity::Critical, 95.0),
        ];
        let recs = aggregate(&alerts, &[]);
        let memory: Vec<&Recommendation> =
            recs.iter().filter(|r| r.category == "memory").collect();
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn sorted_priority_desc_then_category_asc() {
        let alerts = vec![
            alert(MetricKind::DiskUsage, Severity::High, 86.0),
            alert(MetricKind::CpuTemp, Severity::Critical, 90.0),
            alert(MetricKind::RamUsage, Severity::High, 85.0),
        ];
        let recs = aggregate(&alerts, &[]);
        assert_eq!(recs[0].priority, Severity::Critical);
        assert_eq!(recs[0].category, "thermal");
        // High ties ordered by category: memory < storage
        assert_eq!(recs[1].category, "memory");
        assert_eq!(recs[2].category, "storage");
        // Maintenance floats to the bottom
        assert_eq!(recs.last().expect("non-empty").category, "maintenance");
    }

    #[test]
    fn aggregate_is_idempotent() {
        let alerts = vec![
            alert(MetricKind::CpuTemp, Severity::Critical, 90.0),
            alert(MetricKind::DiskUsage, Severity::High, 87.0),
        ];
        let samples = disk_samples(&[80.0, 81.0, 82.0, 83.0, 84.0]);
        let first = aggregate(&alerts, &samples);
        let second = aggregate(&alerts, &samples);
        assert_eq!(first, second);
    }

    #[test]
    fn disk_trend_rule_fires_on_rising_tail() {
        let samples = disk_samples(&[70.0, 70.5, 71.0, 71.0, 72.0]);
        let recs = aggregate(&[], &samples);
        assert!(recs
            .iter()
            .any(|r| r.category == "storage" && r.priority == Severity::Low));
    }

    #[test]
    fn disk_trend_rule_ignores_flat_series() {
        let samples = disk_samples(&[70.0, 70.0, 70.0, 70.0, 70.0]);
        let recs = aggregate(&[], &samples);
        assert!(!recs.iter().any(|r| r.category == "storage"));
    }

    #[test]
    fn disk_trend_rule_ignores_dips() {
        let samples = disk_samples(&[70.0, 72.0, 71.0, 73.0, 74.0]);
        let recs = aggregate(&[], &samples);
        assert!(!recs.iter().any(|r| r.category == "storage"));
    }

    #[test]
    fn disk_trend_rule_needs_full_window() {
        let samples = disk_samples(&[70.0, 71.0, 72.0, 73.0]);
        let recs = aggregate(&[], &samples);
        assert!(!recs.iter().any(|r| r.category == "storage"));
    }

    #[test]
    fn trend_rule_only_reads_disk_samples() {
        let mut samples = disk_samples(&[70.0, 70.0, 70.0, 70.0, 70.0]);
        for v in [10.0, 20.0, 30.0, 40.0, 50.0] {
            samples.push(Sample::new(MetricKind::CpuUsage, v, Utc::now()));
        }
        let recs = aggregate(&[], &samples);
        assert!(!recs.iter().any(|r| r.category == "storage"));
    }

    #[test]
    fn recommendation_text_is_deterministic() {
        let a = recommendation_text(MetricKind::CpuTemp, Severity::Critical);
        let b = recommendation_text(MetricKind::CpuTemp, Severity::Critical);
        assert_eq!(a, b);
        assert_ne!(
            recommendation_text(MetricKind::CpuTemp, Severity::High),
            recommendation_text(MetricKind::CpuTemp, Severity::Critical)
        );
    }
}
