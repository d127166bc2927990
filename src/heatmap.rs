use anyhow::bail;

use crate::locations::BoundingRegion;
use crate::models::Alert;

pub const DEFAULT_GRID_SIZE: usize = 8;
pub const MAX_GRID_SIZE: usize = 256;

/// Sighting density over a bounding region. Row 0 is the northern edge,
/// column 0 the western edge.
#[derive(Debug, Clone)]
pub struct HeatmapGrid {
    pub region: BoundingRegion,
    pub rows: usize,
    pub cols: usize,
    cells: Vec<usize>,
    pub outside: usize,
}

impl HeatmapGrid {
    pub fn new(region: BoundingRegion, rows: usize, cols: usize) -> anyhow::Result<Self> {
        if rows == 0 || cols == 0 {
            bail!("heatmap grid needs at least one row and one column (got {rows}x{cols})");
        }
        if rows > MAX_GRID_SIZE || cols > MAX_GRID_SIZE {
            bail!("heatmap grid is limited to {MAX_GRID_SIZE}x{MAX_GRID_SIZE} (got {rows}x{cols})");
        }
        Ok(Self {
            region,
            rows,
            cols,
            cells: vec![0; rows * cols],
            outside: 0,
        })
    }

    pub fn from_alerts<'a, I>(
        region: BoundingRegion,
        rows: usize,
        cols: usize,
        alerts: I,
    ) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = &'a Alert>,
    {
        let mut grid = Self::new(region, rows, cols)?;
        for alert in alerts {
            grid.add_point(alert.location.latitude, alert.location.longitude);
        }
        Ok(grid)
    }

    pub fn add_point(&mut self, latitude: f64, longitude: f64) {
        match self.cell_index(latitude, longitude) {
            Some(index) => self.cells[index] += 1,
            None => self.outside += 1,
        }
    }

    fn cell_index(&self, latitude: f64, longitude: f64) -> Option<usize> {
        if !self.region.contains(latitude, longitude) {
            return None;
        }
        let lat_span = self.region.north - self.region.south;
        let lng_span = self.region.east - self.region.west;
        let row = ((self.region.north - latitude) / lat_span * self.rows as f64) as usize;
        let col = ((longitude - self.region.west) / lng_span * self.cols as f64) as usize;
        // The southern and eastern edges belong to the last row/column.
        let row = row.min(self.rows - 1);
        let col = col.min(self.cols - 1);
        Some(row * self.cols + col)
    }

    pub fn cell(&self, row: usize, col: usize) -> usize {
        if row >= self.rows || col >= self.cols {
            return 0;
        }
        self.cells[row * self.cols + col]
    }

    /// Count in the densest cell, with its `(row, col)`.
    pub fn hottest(&self) -> Option<(usize, usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(index, count)| (index / self.cols, index % self.cols, *count))
    }

    /// Cell count scaled against the densest cell.
    pub fn intensity(&self, row: usize, col: usize) -> f64 {
        match self.hottest() {
            Some((_, _, max)) => self.cell(row, col) as f64 / max as f64,
            None => 0.0,
        }
    }

    /// Points that landed inside the region.
    pub fn total(&self) -> usize {
        self.cells.iter().sum()
    }

    /// Text rendering, one line per row, densest cells darkest.
    pub fn render(&self) -> String {
        const SHADES: [char; 5] = ['.', '░', '▒', '▓', '█'];
        let mut output = String::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let shade = if self.cell(row, col) == 0 {
                    SHADES[0]
                } else {
                    let level = (self.intensity(row, col) * 4.0).ceil() as usize;
                    SHADES[level.clamp(1, 4)]
                };
                output.push(shade);
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::locations::MIAMI_DADE;
    use crate::models::{AlertStatus, AlertType, GeoLocation};

    fn alert_at(latitude: f64, longitude: f64) -> Alert {
        Alert {
            id: format!("{latitude}:{longitude}"),
            title: "fixture".to_string(),
            message: "fixture".to_string(),
            alert_type: AlertType::Danger,
            location: GeoLocation {
                latitude,
                longitude,
                address: "fixture".to_string(),
            },
            timestamp: "2026-02-01T00:00:00Z".parse().unwrap(),
            species: catalog::species()[0].clone(),
            status: AlertStatus::Verified,
        }
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(HeatmapGrid::new(MIAMI_DADE, 0, 4).is_err());
        assert!(HeatmapGrid::new(MIAMI_DADE, 4, 0).is_err());
    }

    #[test]
    fn rejects_oversized_grid() {
        assert!(HeatmapGrid::new(MIAMI_DADE, 100_000, 100_000).is_err());
        assert!(HeatmapGrid::new(MIAMI_DADE, MAX_GRID_SIZE + 1, 1).is_err());
        assert!(HeatmapGrid::new(MIAMI_DADE, MAX_GRID_SIZE, MAX_GRID_SIZE).is_ok());
    }

    #[test]
    fn bins_points_by_corner() {
        let alerts = vec![
            alert_at(MIAMI_DADE.north, MIAMI_DADE.west),
            alert_at(MIAMI_DADE.south, MIAMI_DADE.east),
            alert_at(MIAMI_DADE.south, MIAMI_DADE.east),
            alert_at(25.4467, -80.4789),
        ];
        let grid = HeatmapGrid::from_alerts(MIAMI_DADE, 4, 4, &alerts).unwrap();
        assert_eq!(grid.cell(0, 0), 1);
        assert_eq!(grid.cell(3, 3), 2);
        assert_eq!(grid.outside, 1);
        assert_eq!(grid.total(), 3);
        assert_eq!(grid.hottest(), Some((3, 3, 2)));
        assert_eq!(grid.intensity(0, 0), 0.5);
        assert_eq!(grid.intensity(1, 1), 0.0);
    }

    #[test]
    fn empty_grid_has_no_hotspot() {
        let grid = HeatmapGrid::new(MIAMI_DADE, 2, 2).unwrap();
        assert_eq!(grid.hottest(), None);
        assert_eq!(grid.render(), "..\n..\n");
        assert_eq!(grid.cell(5, 5), 0);
    }

    #[test]
    fn render_marks_hottest_cell_darkest() {
        let alerts = vec![alert_at(MIAMI_DADE.north, MIAMI_DADE.west)];
        let grid = HeatmapGrid::from_alerts(MIAMI_DADE, 2, 2, &alerts).unwrap();
        assert_eq!(grid.render(), "█.\n..\n");
    }
}
