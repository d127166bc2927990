use std::io::Write;

use anyhow::Context;

use crate::models::{Alert, SightingCluster};

#[derive(serde::Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    alert_type: &'static str,
    status: &'static str,
    timestamp: String,
    species: &'a str,
    latitude: f64,
    longitude: f64,
    address: &'a str,
    title: &'a str,
}

pub fn write_csv<'a, W, I>(alerts: I, writer: W) -> anyhow::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Alert>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut written = 0usize;

    for alert in alerts {
        csv_writer
            .serialize(CsvRow {
                id: &alert.id,
                alert_type: alert.alert_type.as_str(),
                status: alert.status.as_str(),
                timestamp: alert.timestamp.to_rfc3339(),
                species: &alert.species.name,
                latitude: alert.location.latitude,
                longitude: alert.location.longitude,
                address: &alert.location.address,
                title: &alert.title,
            })
            .with_context(|| format!("failed to write alert {} as CSV", alert.id))?;
        written += 1;
    }

    csv_writer.flush().context("failed to flush CSV output")?;
    Ok(written)
}

pub fn write_clusters_csv<W: Write>(clusters: &[SightingCluster], writer: W) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for cluster in clusters {
        csv_writer
            .serialize(cluster)
            .context("failed to write cluster as CSV")?;
    }
    csv_writer.flush().context("failed to flush CSV output")?;
    Ok(())
}

pub fn to_json(alerts: &[&Alert]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(alerts).context("failed to serialize alerts as JSON")
}
