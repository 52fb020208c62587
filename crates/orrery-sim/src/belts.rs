//! Belt particle generation: the main asteroid belt and the Kuiper belt
//!
//! Particles are generated once, deterministically per seed, and the
//! belt revolves rigidly at the Keplerian mean rate of its mid radius.

use crate::bodies::MU_SUN;
use orrery_core::constants::{AU, DAYS_PER_JULIAN_CENTURY, SECONDS_PER_DAY};
use orrery_core::normalize_angle;
use rand::prelude::*;
use std::f64::consts::PI;

/// Parameters for one belt
#[derive(Clone, Debug)]
pub struct BeltSpec {
    pub name: &'static str,
    pub inner_au: f64,
    pub outer_au: f64,
    /// Vertical half-thickness (AU)
    pub thickness_au: f64,
    pub count: usize,
    pub seed: u64,
    /// Base particle tint; individual particles jitter around it
    pub tint: [f32; 3],
}

impl BeltSpec {
    /// The main asteroid belt between Mars and Jupiter
    pub fn asteroid_belt(count: usize, seed: u64) -> Self {
        Self {
            name: "Asteroid belt",
            inner_au: 2.1,
            outer_au: 3.3,
            thickness_au: 0.25,
            count,
            seed,
            tint: [0.55, 0.5, 0.44],
        }
    }

    /// The Kuiper belt beyond Neptune
    pub fn kuiper_belt(count: usize, seed: u64) -> Self {
        Self {
            name: "Kuiper belt",
            inner_au: 30.0,
            outer_au: 50.0,
            thickness_au: 2.0,
            count,
            seed,
            tint: [0.5, 0.56, 0.62],
        }
    }

    /// Mid-belt radius (meters)
    pub fn mid_radius(&self) -> f64 {
        (self.inner_au + self.outer_au) * 0.5 * AU
    }

    /// Keplerian mean motion at the mid radius (rad/s)
    pub fn mean_motion(&self) -> f64 {
        (MU_SUN / self.mid_radius().powi(3)).sqrt()
    }

    /// Rigid revolution angle of the whole belt at a Julian-century
    /// offset from J2000, normalized to [0, 2π)
    pub fn revolution_angle(&self, jc: f64) -> f64 {
        let seconds = jc * DAYS_PER_JULIAN_CENTURY * SECONDS_PER_DAY;
        normalize_angle(self.mean_motion() * seconds)
    }
}

/// One belt particle, in belt-local cylindrical coordinates
#[derive(Clone, Copy, Debug)]
pub struct BeltParticle {
    pub radius_au: f64,
    /// Azimuth in [0, 2π)
    pub angle: f64,
    pub height_au: f64,
    /// Relative render size in [0.5, 1.5]
    pub size: f32,
    pub tint: [f32; 3],
}

/// Generate a belt's particles. Deterministic for a given spec.
pub fn generate_belt(spec: &BeltSpec) -> Vec<BeltParticle> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut particles = Vec::with_capacity(spec.count);

    for _ in 0..spec.count {
        // Triangular radial distribution biases particles to the midline
        let u = (rng.gen::<f64>() + rng.gen::<f64>()) * 0.5;
        let radius_au = spec.inner_au + (spec.outer_au - spec.inner_au) * u;

        let angle = rng.gen::<f64>() * 2.0 * PI;

        let v = (rng.gen::<f64>() + rng.gen::<f64>()) * 0.5;
        let height_au = (v * 2.0 - 1.0) * spec.thickness_au;

        let size = 0.5 + rng.gen::<f32>();

        let shade = 0.8 + rng.gen::<f32>() * 0.4;
        let tint = [
            (spec.tint[0] * shade).min(1.0),
            (spec.tint[1] * shade).min(1.0),
            (spec.tint[2] * shade).min(1.0),
        ];

        particles.push(BeltParticle {
            radius_au,
            angle,
            height_au,
            size,
            tint,
        });
    }

    particles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_per_seed() {
        let spec = BeltSpec::asteroid_belt(500, 42);
        let a = generate_belt(&spec);
        let b = generate_belt(&spec);

        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(&b) {
            assert_eq!(p.radius_au, q.radius_au);
            assert_eq!(p.angle, q.angle);
            assert_eq!(p.height_au, q.height_au);
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_belt(&BeltSpec::asteroid_belt(100, 1));
        let b = generate_belt(&BeltSpec::asteroid_belt(100, 2));
        let identical = a.iter().zip(&b).all(|(p, q)| p.angle == q.angle);
        assert!(!identical);
    }

    #[test]
    fn test_particles_within_bounds() {
        let spec = BeltSpec::kuiper_belt(2000, 7);
        for p in generate_belt(&spec) {
            assert!(p.radius_au >= spec.inner_au && p.radius_au <= spec.outer_au);
            assert!(p.height_au.abs() <= spec.thickness_au);
            assert!((0.0..2.0 * PI).contains(&p.angle));
            assert!(p.size >= 0.5 && p.size <= 1.5);
        }
    }

    #[test]
    fn test_count_honored() {
        assert_eq!(generate_belt(&BeltSpec::asteroid_belt(1234, 9)).len(), 1234);
        assert!(generate_belt(&BeltSpec::asteroid_belt(0, 9)).is_empty());
    }

    #[test]
    fn test_revolution_angle_range_and_rate() {
        let spec = BeltSpec::asteroid_belt(10, 0);
        for jc in [-1.0, 0.0, 0.013, 2.0] {
            let a = spec.revolution_angle(jc);
            assert!((0.0..2.0 * PI).contains(&a));
        }

        // ~2.7 AU belt revolves in roughly 4.4 years
        let period_years = 2.0 * PI / spec.mean_motion() / (365.25 * 86400.0);
        assert!((period_years - 4.4).abs() < 0.3, "period {} yr", period_years);
    }

    #[test]
    fn test_kuiper_outside_asteroid() {
        let main = BeltSpec::asteroid_belt(1, 0);
        let kuiper = BeltSpec::kuiper_belt(1, 0);
        assert!(kuiper.inner_au > main.outer_au);
        // Outer belts revolve slower
        assert!(kuiper.mean_motion() < main.mean_motion());
    }
}
