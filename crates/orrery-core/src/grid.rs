use crate::constants::*;
use crate::coordinates::CartesianPosition;
use serde::{Deserialize, Serialize};

/// Configuration for the reference grid
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// Innermost ring radius (meters)
    pub r_min: f64,
    /// Ratio between consecutive ring radii
    pub log_base: f64,
    /// Radial spokes through the origin
    pub n_spokes: u32,
    /// Sample points per ring polyline
    pub ring_segments: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            r_min: GRID_R_MIN,
            log_base: GRID_LOG_BASE,
            n_spokes: GRID_N_SPOKES,
            ring_segments: 128,
        }
    }
}

/// Logarithmically spaced reference rings and radial spokes in the
/// ecliptic plane. Ring k sits at `r_min * log_base^k`, so consecutive
/// rings share a boundary the way logarithmic shells do.
pub struct ReferenceGrid {
    config: GridConfig,
}

impl ReferenceGrid {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(GridConfig::default())
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Radius of ring k (meters)
    pub fn ring_radius(&self, k: u32) -> f64 {
        self.config.r_min * self.config.log_base.powi(k as i32)
    }

    /// Index of the outermost ring at or inside `max_radius`
    pub fn ring_count_for(&self, max_radius: f64) -> u32 {
        if max_radius <= self.config.r_min {
            return 1;
        }
        let k = (max_radius / self.config.r_min).ln() / self.config.log_base.ln();
        k.floor() as u32 + 1
    }

    /// All ring radii out to `max_radius` (meters), innermost first
    pub fn ring_radii(&self, max_radius: f64) -> Vec<f64> {
        (0..self.ring_count_for(max_radius))
            .map(|k| self.ring_radius(k))
            .collect()
    }

    /// Azimuth of spoke s in radians, evenly spaced over [0, 2π)
    pub fn spoke_angle(&self, s: u32) -> f64 {
        2.0 * std::f64::consts::PI * s as f64 / self.config.n_spokes as f64
    }

    /// Closed polyline around ring k (first point repeated at the end)
    pub fn ring_polyline(&self, k: u32) -> Vec<CartesianPosition> {
        let r = self.ring_radius(k);
        let n = self.config.ring_segments;
        (0..=n)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                CartesianPosition::new(r * theta.cos(), r * theta.sin(), 0.0)
            })
            .collect()
    }

    /// Spoke s as a segment from the innermost ring to `max_radius`
    pub fn spoke_polyline(&self, s: u32, max_radius: f64) -> [CartesianPosition; 2] {
        let theta = self.spoke_angle(s);
        let (sin_t, cos_t) = theta.sin_cos();
        [
            CartesianPosition::new(self.config.r_min * cos_t, self.config.r_min * sin_t, 0.0),
            CartesianPosition::new(max_radius * cos_t, max_radius * sin_t, 0.0),
        ]
    }
}
