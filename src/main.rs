use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod catalog;
mod cluster;
mod export;
mod feed;
mod heatmap;
mod locations;
mod models;
mod report;

use crate::feed::{AlertFeed, FeedConfig, DEFAULT_RECENT_COUNT};
use crate::models::{Alert, AlertStatus, AlertType, Species};

#[derive(Parser)]
#[command(name = "wildlife-alert-feed")]
#[command(about = "Invasive species alert feed for Miami-Dade wildlife patrols", long_about = None)]
struct Cli {
    /// Seed for the alert generator (falls back to PATROL_SEED, then OS entropy)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Fixed generation clock as an RFC 3339 instant
    #[arg(long, global = true)]
    now: Option<String>,
    /// Number of synthetic alerts to generate
    #[arg(long, global = true, default_value_t = 26)]
    synthetic_count: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// List the monitored species
    Species,
    /// Show the most recent alerts
    Recent {
        #[arg(long, default_value_t = DEFAULT_RECENT_COUNT)]
        count: usize,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List alerts, optionally filtered
    Alerts {
        #[arg(long = "type", value_enum)]
        alert_type: Option<AlertType>,
        #[arg(long, value_enum)]
        status: Option<AlertStatus>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Render a sighting density grid for one species
    Heatmap {
        #[arg(long)]
        species: String,
        #[arg(long, default_value_t = heatmap::DEFAULT_GRID_SIZE)]
        rows: usize,
        #[arg(long, default_value_t = heatmap::DEFAULT_GRID_SIZE)]
        cols: usize,
    },
    /// Group nearby sightings into density clusters
    Clusters {
        #[arg(long)]
        species: Option<String>,
        /// Neighbourhood radius in kilometres
        #[arg(long, default_value_t = 10.0)]
        eps_km: f64,
        #[arg(long, default_value_t = 4)]
        min_samples: usize,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Generate a markdown digest
    Report {
        #[arg(long)]
        species: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let now = match cli.now.as_deref() {
        Some(value) => value
            .parse::<DateTime<Utc>>()
            .with_context(|| format!("--now must be an RFC 3339 instant, got {value:?}"))?,
        None => Utc::now(),
    };
    let mut rng = build_rng(cli.seed)?;
    let config = FeedConfig {
        synthetic_count: cli.synthetic_count,
        ..FeedConfig::default()
    };
    let feed = AlertFeed::generate_with(&mut rng, now, &config);
    debug!("feed holds {} alerts", feed.len());

    match cli.command {
        Commands::Species => {
            for species in feed.species() {
                println!(
                    "{} {} ({}) {} risk",
                    species.id,
                    species.name,
                    species.scientific_name,
                    species.danger_level.as_str()
                );
            }
        }
        Commands::Recent { count, format } => {
            let alerts: Vec<&Alert> = feed.recent(count).iter().collect();
            print_alerts(&alerts, format)?;
        }
        Commands::Alerts {
            alert_type,
            status,
            species,
            format,
        } => {
            let species = species
                .as_deref()
                .map(|name| lookup_species(&feed, name))
                .transpose()?;
            let mut alerts: Vec<&Alert> = match alert_type {
                Some(alert_type) => feed.by_type(alert_type),
                None => feed.alerts().iter().collect(),
            };
            if let Some(status) = status {
                alerts.retain(|alert| alert.status == status);
            }
            if let Some(species) = species {
                alerts.retain(|alert| alert.species.id == species.id);
            }
            print_alerts(&alerts, format)?;
        }
        Commands::Heatmap {
            species,
            rows,
            cols,
        } => {
            let species = lookup_species(&feed, &species)?;
            let alerts = feed.for_species(&species.id);
            let grid = heatmap::HeatmapGrid::from_alerts(
                locations::MIAMI_DADE,
                rows,
                cols,
                alerts.iter().copied(),
            )?;

            println!("{} sightings ({} outside the county grid)", grid.total(), grid.outside);
            print!("{}", grid.render());
            if let Some((row, col, count)) = grid.hottest() {
                println!("Hotspot at row {row}, column {col} with {count} sightings.");
            }
        }
        Commands::Clusters {
            species,
            eps_km,
            min_samples,
            format,
        } => {
            let species = species
                .as_deref()
                .map(|name| lookup_species(&feed, name))
                .transpose()?;
            let alerts: Vec<&Alert> = match species {
                Some(species) => feed.for_species(&species.id),
                None => feed.alerts().iter().collect(),
            };
            let params = cluster::ClusterParams {
                eps_m: eps_km * 1000.0,
                min_samples,
            };
            let clusters = cluster::cluster_alerts(alerts.iter().copied(), &params)?;

            match format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&clusters)
                        .context("failed to serialize clusters as JSON")?
                ),
                OutputFormat::Csv => {
                    export::write_clusters_csv(&clusters, std::io::stdout().lock())?;
                }
                OutputFormat::Text => {
                    if clusters.is_empty() {
                        println!("No clusters among {} sightings.", alerts.len());
                    }
                    for (index, found) in clusters.iter().enumerate() {
                        println!(
                            "- cluster {}: {} sightings around {:.4}, {:.4} (radius {:.0} m)",
                            index, found.count, found.center_lat, found.center_lng, found.radius_m
                        );
                    }
                }
            }
        }
        Commands::Report {
            species,
            limit,
            out,
        } => {
            let species = species
                .as_deref()
                .map(|name| lookup_species(&feed, name))
                .transpose()?;
            let alerts: Vec<&Alert> = match species {
                Some(species) => feed.for_species(&species.id),
                None => feed.alerts().iter().collect(),
            };
            let report = report::build_report(species, &alerts, limit);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            info!(
                "wrote {} alerts to {} ({} feed-wide alerts pending verification)",
                alerts.len(),
                out.display(),
                feed.by_status(AlertStatus::Pending).len()
            );
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn build_rng(seed: Option<u64>) -> anyhow::Result<StdRng> {
    let seed = match seed {
        Some(seed) => Some(seed),
        None => match std::env::var("PATROL_SEED") {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .context("PATROL_SEED must be an unsigned integer")?,
            ),
            Err(_) => None,
        },
    };

    Ok(match seed {
        Some(seed) => {
            debug!("seeding alert generator with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    })
}

fn lookup_species<'a>(feed: &'a AlertFeed, name: &str) -> anyhow::Result<&'a Species> {
    match catalog::find_by_name(feed.species(), name)
        .or_else(|| catalog::find_by_id(feed.species(), name))
    {
        Some(species) => Ok(species),
        None => bail!("unknown species {name:?}; run `species` to list the catalog"),
    }
}

fn print_alerts(alerts: &[&Alert], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if alerts.is_empty() {
                println!("No alerts match.");
                return Ok(());
            }
            for alert in alerts {
                println!(
                    "- #{} [{}] {} {} ({}, {})",
                    alert.id,
                    alert.alert_type.as_str(),
                    alert.timestamp.format("%Y-%m-%d %H:%M"),
                    alert.title,
                    alert.species.name,
                    alert.status.as_str()
                );
            }
        }
        OutputFormat::Json => println!("{}", export::to_json(alerts)?),
        OutputFormat::Csv => {
            export::write_csv(alerts.iter().copied(), std::io::stdout().lock())?;
        }
    }
    Ok(())
}
