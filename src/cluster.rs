use std::collections::VecDeque;

use anyhow::bail;
use log::debug;

use crate::models::{Alert, SightingCluster};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Neighbourhood radius in metres.
    pub eps_m: f64,
    /// Neighbours (the point itself included) needed for a core point.
    pub min_samples: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            eps_m: 10_000.0,
            min_samples: 4,
        }
    }
}

/// Great-circle distance in metres between two `(lat, lng)` points in degrees.
pub fn haversine_m(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lng1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lng2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    EARTH_RADIUS_M * 2.0 * h.sqrt().min(1.0).asin()
}

pub fn cluster_alerts<'a, I>(alerts: I, params: &ClusterParams) -> anyhow::Result<Vec<SightingCluster>>
where
    I: IntoIterator<Item = &'a Alert>,
{
    let points: Vec<(f64, f64)> = alerts
        .into_iter()
        .map(|alert| (alert.location.latitude, alert.location.longitude))
        .collect();
    cluster_points(&points, params)
}

/// Density-based clustering of sightings. Noise points are dropped; each
/// cluster reports its mean center and the distance to its farthest member.
pub fn cluster_points(
    points: &[(f64, f64)],
    params: &ClusterParams,
) -> anyhow::Result<Vec<SightingCluster>> {
    if params.min_samples == 0 {
        bail!("min_samples must be at least 1");
    }
    if params.eps_m.is_nan() || params.eps_m <= 0.0 {
        bail!("cluster radius must be positive (got {} m)", params.eps_m);
    }

    let neighbours = |index: usize| -> Vec<usize> {
        (0..points.len())
            .filter(|&other| haversine_m(points[index], points[other]) <= params.eps_m)
            .collect()
    };

    let mut visited = vec![false; points.len()];
    let mut labels: Vec<Option<usize>> = vec![None; points.len()];
    let mut cluster_count = 0usize;

    for start in 0..points.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let seeds = neighbours(start);
        if seeds.len() < params.min_samples {
            continue;
        }

        let label = cluster_count;
        cluster_count += 1;
        labels[start] = Some(label);

        let mut queue: VecDeque<usize> = seeds.into();
        while let Some(index) = queue.pop_front() {
            if labels[index].is_none() {
                labels[index] = Some(label);
            }
            if visited[index] {
                continue;
            }
            visited[index] = true;
            let reachable = neighbours(index);
            if reachable.len() >= params.min_samples {
                queue.extend(reachable);
            }
        }
    }

    let mut members: Vec<Vec<(f64, f64)>> = vec![Vec::new(); cluster_count];
    for (point, label) in points.iter().zip(labels.iter()) {
        if let Some(label) = label {
            members[*label].push(*point);
        }
    }

    let clusters: Vec<SightingCluster> = members
        .into_iter()
        .map(|cluster| {
            let count = cluster.len();
            let center_lat = cluster.iter().map(|p| p.0).sum::<f64>() / count as f64;
            let center_lng = cluster.iter().map(|p| p.1).sum::<f64>() / count as f64;
            let radius_m = cluster
                .iter()
                .map(|point| haversine_m((center_lat, center_lng), *point))
                .fold(0.0, f64::max);
            SightingCluster {
                count,
                center_lat,
                center_lng,
                radius_m,
            }
        })
        .collect();

    debug!(
        "clustered {} sightings into {} clusters ({} noise)",
        points.len(),
        clusters.len(),
        labels.iter().filter(|label| label.is_none()).count()
    );
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn around(lat: f64, lng: f64, count: usize) -> Vec<(f64, f64)> {
        (0..count)
            .map(|i| (lat + 0.002 * i as f64, lng - 0.002 * i as f64))
            .collect()
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let distance = haversine_m((25.0, -80.0), (26.0, -80.0));
        assert!((distance - 111_195.0).abs() < 100.0, "got {distance}");
        assert_eq!(haversine_m((25.7, -80.3), (25.7, -80.3)), 0.0);
    }

    #[test]
    fn finds_two_clusters_and_drops_noise() {
        let mut points = around(25.7617, -80.7650, 5);
        points.extend(around(25.6891, -80.1628, 4));
        // Florida City, far from both groups.
        points.push((25.4467, -80.4789));

        let clusters = cluster_points(&points, &ClusterParams::default()).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].count, 5);
        assert_eq!(clusters[1].count, 4);
        assert_eq!(clusters.iter().map(|c| c.count).sum::<usize>(), 9);

        assert!((clusters[0].center_lat - 25.7657).abs() < 1e-9);
        assert!((clusters[0].center_lng - -80.7690).abs() < 1e-9);
        assert!(clusters[0].radius_m > 0.0 && clusters[0].radius_m < 2_000.0);
        assert!((clusters[1].center_lat - 25.6921).abs() < 1e-9);
    }

    #[test]
    fn sparse_points_form_no_cluster() {
        let points = around(25.7617, -80.7650, 3);
        let clusters = cluster_points(&points, &ClusterParams::default()).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn border_points_join_a_cluster() {
        // Within 10 km of the northernmost tight point only, so it is not
        // a core point itself.
        let mut points = around(25.70, -80.40, 4);
        points.insert(0, (25.794, -80.406));
        let clusters = cluster_points(&points, &ClusterParams::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 5);
    }

    #[test]
    fn rejects_bad_params() {
        let points = around(25.7, -80.3, 4);
        let zero_samples = ClusterParams {
            min_samples: 0,
            ..ClusterParams::default()
        };
        assert!(cluster_points(&points, &zero_samples).is_err());
        let zero_radius = ClusterParams {
            eps_m: 0.0,
            ..ClusterParams::default()
        };
        assert!(cluster_points(&points, &zero_radius).is_err());
    }
}
