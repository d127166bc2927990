use std::fmt::Write;

use crate::models::{Alert, AlertStatus, AlertType, AlertTypeSummary, Species};

pub fn summarize_by_type<'a, I>(alerts: I) -> Vec<AlertTypeSummary>
where
    I: IntoIterator<Item = &'a Alert>,
{
    let mut map: std::collections::HashMap<AlertType, (usize, usize)> =
        std::collections::HashMap::new();

    for alert in alerts {
        let entry = map.entry(alert.alert_type).or_insert((0, 0));
        entry.0 += 1;
        if alert.status == AlertStatus::Verified {
            entry.1 += 1;
        }
    }

    let mut summaries: Vec<AlertTypeSummary> = map
        .into_iter()
        .map(|(alert_type, (count, verified))| AlertTypeSummary {
            alert_type,
            count,
            verified,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.alert_type.as_str().cmp(b.alert_type.as_str()))
    });
    summaries
}

/// Markdown digest of an already sorted alert list.
pub fn build_report(species: Option<&Species>, alerts: &[&Alert], limit: usize) -> String {
    let summaries = summarize_by_type(alerts.iter().copied());

    let mut output = String::new();
    let scope_label = species.map(|s| s.name.as_str()).unwrap_or("all species");

    let _ = writeln!(output, "# Wildlife Alert Digest");
    let _ = writeln!(output, "Generated for {} ({} alerts)", scope_label, alerts.len());

    if let Some(species) = species {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "_{}_ ({} risk): {}",
            species.scientific_name,
            species.danger_level.as_str(),
            species.description
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Alert Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No alerts recorded.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} alerts ({} verified)",
                summary.alert_type.as_str(),
                summary.count,
                summary.verified
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Most Recent Alerts");

    if alerts.is_empty() {
        let _ = writeln!(output, "No alerts recorded.");
    } else {
        for alert in alerts.iter().take(limit) {
            let _ = writeln!(
                output,
                "- [{}] {} on {}: {} ({}, {})",
                alert.alert_type.as_str(),
                alert.species.name,
                alert.timestamp.format("%Y-%m-%d"),
                alert.title,
                alert.location.address,
                alert.status.as_str()
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::models::GeoLocation;

    fn sample_alert(id: &str, alert_type: AlertType, status: AlertStatus, day: u32) -> Alert {
        Alert {
            id: id.to_string(),
            title: format!("Sighting {id}"),
            message: "fixture".to_string(),
            alert_type,
            location: GeoLocation {
                latitude: 25.76,
                longitude: -80.76,
                address: "Shark Valley".to_string(),
            },
            timestamp: format!("2026-02-{day:02}T09:00:00Z").parse().unwrap(),
            species: catalog::species()[0].clone(),
            status,
        }
    }

    #[test]
    fn summaries_count_by_type() {
        let alerts = vec![
            sample_alert("1", AlertType::Danger, AlertStatus::Verified, 3),
            sample_alert("2", AlertType::Danger, AlertStatus::Pending, 2),
            sample_alert("3", AlertType::Info, AlertStatus::Verified, 1),
        ];
        let summaries = summarize_by_type(&alerts);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].alert_type, AlertType::Danger);
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].verified, 1);
        assert_eq!(summaries.iter().map(|s| s.count).sum::<usize>(), alerts.len());
    }

    #[test]
    fn report_lists_recent_alerts_up_to_limit() {
        let alerts = vec![
            sample_alert("1", AlertType::Danger, AlertStatus::Verified, 3),
            sample_alert("2", AlertType::Warning, AlertStatus::Pending, 2),
        ];
        let refs: Vec<&Alert> = alerts.iter().collect();
        let report = build_report(None, &refs, 1);

        assert!(report.starts_with("# Wildlife Alert Digest"));
        assert!(report.contains("Generated for all species (2 alerts)"));
        assert!(report.contains(
            "- [danger] Burmese Python on 2026-02-03: Sighting 1 (Shark Valley, verified)"
        ));
        assert!(!report.contains("Sighting 2"));
    }

    #[test]
    fn report_handles_empty_scope() {
        let catalog = catalog::species();
        let report = build_report(Some(&catalog[5]), &[], 10);
        assert!(report.contains("Generated for Giant African Land Snail (0 alerts)"));
        assert!(report.contains("_Lissachatina fulica_ (medium risk)"));
        assert!(report.contains("No alerts recorded."));
    }
}
