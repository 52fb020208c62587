//! Synthetic star backdrop
//!
//! Deterministic seeded stars on a far dome, with magnitudes mapped to
//! billboard size and a blackbody-ish color spread.

use crate::geometry::ParticleInstance;
use rand::prelude::*;

/// Generate `count` stars uniformly distributed on a sphere of
/// `dome_radius` scene units.
pub fn generate_stars(count: usize, seed: u64, dome_radius: f32) -> Vec<ParticleInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stars = Vec::with_capacity(count);

    for _ in 0..count {
        // Uniform direction: z in [-1, 1], azimuth in [0, 2π)
        let z = rng.gen::<f32>() * 2.0 - 1.0;
        let theta = rng.gen::<f32>() * 2.0 * std::f32::consts::PI;
        let planar = (1.0 - z * z).sqrt();
        let dir = [planar * theta.cos(), z, planar * theta.sin()];

        // Apparent magnitude in [-1, 6]; most stars are faint
        let mag = -1.0 + 7.0 * rng.gen::<f32>().powf(0.5);

        // Brighter (smaller) magnitudes get larger billboards
        let size = dome_radius * 0.0045 * 10.0_f32.powf(-0.13 * mag);

        // Color temperature spread: red dwarfs through blue-white
        let t = rng.gen::<f32>();
        let color = if t < 0.15 {
            [1.0, 0.75, 0.6]
        } else if t < 0.55 {
            [1.0, 0.95, 0.85]
        } else if t < 0.85 {
            [0.95, 0.95, 1.0]
        } else {
            [0.75, 0.82, 1.0]
        };

        let alpha = (0.35 + 0.65 * 10.0_f32.powf(-0.2 * mag)).min(1.0);

        stars.push(ParticleInstance {
            position: [
                dir[0] * dome_radius,
                dir[1] * dome_radius,
                dir[2] * dome_radius,
            ],
            size,
            color: [color[0], color[1], color[2], alpha],
        });
    }

    stars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_per_seed() {
        let a = generate_stars(300, 11, 1000.0);
        let b = generate_stars(300, 11, 1000.0);
        for (p, q) in a.iter().zip(&b) {
            assert_eq!(p.position, q.position);
            assert_eq!(p.color, q.color);
        }
    }

    #[test]
    fn test_on_dome_radius() {
        let dome = 1500.0;
        for star in generate_stars(500, 3, dome) {
            let r = (star.position[0].powi(2) + star.position[1].powi(2) + star.position[2].powi(2))
                .sqrt();
            assert!((r - dome).abs() < dome * 1e-5, "star at {}", r);
        }
    }

    #[test]
    fn test_count_and_positive_sizes() {
        let stars = generate_stars(1234, 0, 1000.0);
        assert_eq!(stars.len(), 1234);
        assert!(stars.iter().all(|s| s.size > 0.0));
        assert!(stars.iter().all(|s| s.color[3] > 0.0 && s.color[3] <= 1.0));
    }

    #[test]
    fn test_covers_both_hemispheres() {
        let stars = generate_stars(2000, 5, 1000.0);
        let above = stars.iter().filter(|s| s.position[1] > 0.0).count();
        let below = stars.len() - above;
        // Uniform distribution should not be badly lopsided
        assert!(above > stars.len() / 3 && below > stars.len() / 3);
    }
}
