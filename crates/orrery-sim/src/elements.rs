//! Keplerian orbital elements and conversions

use nalgebra::{Matrix3, Vector3};
use orrery_core::constants::{DAYS_PER_JULIAN_CENTURY, SECONDS_PER_DAY};
use orrery_core::normalize_angle;
use std::f64::consts::PI;

/// Classical Keplerian orbital elements
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (meters)
    pub a: f64,
    /// Eccentricity (dimensionless, 0 = circular)
    pub e: f64,
    /// Inclination (radians)
    pub i: f64,
    /// Longitude of ascending node / RAAN (radians)
    pub raan: f64,
    /// Argument of perihelion (radians)
    pub arg_peri: f64,
    /// Mean anomaly at epoch (radians)
    pub m0: f64,
    /// Reference epoch (Julian centuries from J2000)
    pub epoch_jc: f64,
    /// Gravitational parameter μ of the central body (m³/s²)
    pub mu: f64,
}

impl OrbitalElements {
    #[allow(clippy::too_many_arguments)]
    pub fn new(a: f64, e: f64, i: f64, raan: f64, arg_peri: f64, m0: f64, epoch_jc: f64, mu: f64) -> Self {
        Self { a, e, i, raan, arg_peri, m0, epoch_jc, mu }
    }

    /// Mean motion (radians per second)
    pub fn mean_motion(&self) -> f64 {
        (self.mu / self.a.powi(3)).sqrt()
    }

    /// Orbital period (seconds)
    pub fn period(&self) -> f64 {
        2.0 * PI / self.mean_motion()
    }

    /// Mean anomaly at given Julian centuries from J2000, in [0, 2π)
    pub fn mean_anomaly_at(&self, jc: f64) -> f64 {
        let dt_seconds = (jc - self.epoch_jc) * DAYS_PER_JULIAN_CENTURY * SECONDS_PER_DAY;
        normalize_angle(self.m0 + self.mean_motion() * dt_seconds)
    }

    /// Solve Kepler's equation M = E - e·sin(E) for the eccentric anomaly E
    /// via Newton-Raphson.
    pub fn eccentric_anomaly(&self, mean_anomaly: f64) -> f64 {
        let m = normalize_angle(mean_anomaly);
        let e = self.e;

        // High-eccentricity orbits converge better from E₀ = π
        let mut ea = if e < 0.8 { m } else { PI };

        for _ in 0..50 {
            let f = ea - e * ea.sin() - m;
            let fp = 1.0 - e * ea.cos();
            let delta = f / fp;
            ea -= delta;

            if delta.abs() < 1e-12 {
                break;
            }
        }

        ea
    }

    /// True anomaly ν from eccentric anomaly E:
    /// tan(ν/2) = sqrt((1+e)/(1-e)) · tan(E/2)
    pub fn true_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        let half = ((1.0 + self.e) / (1.0 - self.e)).sqrt() * (eccentric_anomaly / 2.0).tan();
        2.0 * half.atan()
    }

    /// Distance from the focus at a given true anomaly (meters)
    pub fn radius(&self, true_anomaly: f64) -> f64 {
        self.a * (1.0 - self.e.powi(2)) / (1.0 + self.e * true_anomaly.cos())
    }

    /// Position in the orbital plane (perifocal frame, x toward perihelion)
    pub fn position_perifocal(&self, true_anomaly: f64) -> (f64, f64) {
        let r = self.radius(true_anomaly);
        (r * true_anomaly.cos(), r * true_anomaly.sin())
    }

    /// Velocity in the orbital plane (perifocal frame)
    pub fn velocity_perifocal(&self, true_anomaly: f64) -> (f64, f64) {
        let p = self.a * (1.0 - self.e.powi(2));
        let h = (self.mu * p).sqrt();

        let vx = -self.mu / h * true_anomaly.sin();
        let vy = self.mu / h * (self.e + true_anomaly.cos());
        (vx, vy)
    }

    /// Rotation from the perifocal frame to the ecliptic J2000 frame:
    /// R_z(-Ω) · R_x(-i) · R_z(-ω)
    pub fn perifocal_to_ecliptic(&self) -> Matrix3<f64> {
        let (sin_o, cos_o) = self.raan.sin_cos();
        let (sin_i, cos_i) = self.i.sin_cos();
        let (sin_w, cos_w) = self.arg_peri.sin_cos();

        Matrix3::new(
            cos_o * cos_w - sin_o * sin_w * cos_i,
            -cos_o * sin_w - sin_o * cos_w * cos_i,
            sin_o * sin_i,
            sin_o * cos_w + cos_o * sin_w * cos_i,
            -sin_o * sin_w + cos_o * cos_w * cos_i,
            -cos_o * sin_i,
            sin_w * sin_i,
            cos_w * sin_i,
            cos_i,
        )
    }

    /// Position in the ecliptic J2000 frame of the central body (meters)
    pub fn position_ecliptic(&self, jc: f64) -> Vector3<f64> {
        let nu = self.true_anomaly(self.eccentric_anomaly(self.mean_anomaly_at(jc)));
        let (x_pf, y_pf) = self.position_perifocal(nu);

        self.perifocal_to_ecliptic() * Vector3::new(x_pf, y_pf, 0.0)
    }

    /// Velocity in the ecliptic J2000 frame of the central body (m/s)
    pub fn velocity_ecliptic(&self, jc: f64) -> Vector3<f64> {
        let nu = self.true_anomaly(self.eccentric_anomaly(self.mean_anomaly_at(jc)));
        let (vx_pf, vy_pf) = self.velocity_perifocal(nu);

        self.perifocal_to_ecliptic() * Vector3::new(vx_pf, vy_pf, 0.0)
    }

    /// Propagate elements with secular perturbations
    pub fn propagate(&self, target_jc: f64, rates: &SecularRates) -> OrbitalElements {
        let dt = target_jc - self.epoch_jc;

        OrbitalElements {
            a: self.a + rates.da * dt,
            e: (self.e + rates.de * dt).clamp(0.0, 0.99),
            i: self.i + rates.di * dt,
            raan: normalize_angle(self.raan + rates.d_raan * dt),
            arg_peri: normalize_angle(self.arg_peri + rates.d_arg_peri * dt),
            m0: self.m0, // mean anomaly advances via mean_anomaly_at
            epoch_jc: self.epoch_jc,
            mu: self.mu,
        }
    }
}

/// Secular perturbation rates (per Julian century)
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SecularRates {
    /// Semi-major axis rate (m/century), usually ~0
    pub da: f64,
    /// Eccentricity rate (1/century)
    pub de: f64,
    /// Inclination rate (rad/century)
    pub di: f64,
    /// RAAN precession rate (rad/century)
    pub d_raan: f64,
    /// Argument of perihelion rate (rad/century)
    pub d_arg_peri: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MU_SUN: f64 = 1.32712440018e20;

    fn circular_1au() -> OrbitalElements {
        OrbitalElements::new(1.496e11, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, MU_SUN)
    }

    #[test]
    fn test_kepler_circular() {
        // Circular orbit: e=0 means E=M=ν
        let elements = circular_1au();

        let m = PI / 4.0;
        let ea = elements.eccentric_anomaly(m);
        let nu = elements.true_anomaly(ea);

        assert!((ea - m).abs() < 1e-10);
        assert!((nu - m).abs() < 1e-10);
    }

    #[test]
    fn test_kepler_residual() {
        // Mercury-like eccentricity: the solver must satisfy E - e·sin(E) = M
        let elements = OrbitalElements::new(5.79e10, 0.2056, 0.0, 0.0, 0.0, 0.0, 0.0, MU_SUN);

        for m in [0.3, 1.5, 2.9, 4.4, 6.0] {
            let ea = elements.eccentric_anomaly(m);
            let residual = ea - elements.e * ea.sin() - m;
            assert!(residual.abs() < 1e-11, "residual {} at M={}", residual, m);
        }
    }

    #[test]
    fn test_kepler_apsides() {
        let elements = OrbitalElements::new(1.496e11, 0.0167, 0.0, 0.0, 0.0, 0.0, 0.0, MU_SUN);

        // At perihelion (M=0): E=0, ν=0
        assert!(elements.eccentric_anomaly(0.0).abs() < 1e-10);

        // At aphelion (M=π): E=π, ν=π
        assert!((elements.eccentric_anomaly(PI) - PI).abs() < 1e-10);
    }

    #[test]
    fn test_period_earth() {
        let elements = circular_1au();
        let days = elements.period() / SECONDS_PER_DAY;
        assert!((days - 365.25).abs() < 1.0, "period {} days", days);
    }

    #[test]
    fn test_position_radius_bounds() {
        let elements = OrbitalElements::new(1.496e11, 0.1, 0.2, 0.3, 0.4, 0.5, 0.0, MU_SUN);

        // r always within [a(1-e), a(1+e)]
        for step in 0..20 {
            let jc = step as f64 * 0.01;
            let r = elements.position_ecliptic(jc).norm();
            assert!(r >= elements.a * (1.0 - elements.e) * 0.999999);
            assert!(r <= elements.a * (1.0 + elements.e) * 1.000001);
        }
    }

    #[test]
    fn test_propagate_clamps_and_normalizes() {
        let elements = OrbitalElements::new(1.496e11, 0.95, 0.0, 6.0, 6.0, 0.0, 0.0, MU_SUN);
        let rates = SecularRates {
            de: 1.0,        // drives e past the clamp in one century
            d_raan: 4.0,    // pushes Ω past 2π
            d_arg_peri: 4.0,
            ..Default::default()
        };

        let p = elements.propagate(1.0, &rates);
        assert!(p.e <= 0.99);
        let two_pi = 2.0 * PI;
        assert!((0.0..two_pi).contains(&p.raan));
        assert!((0.0..two_pi).contains(&p.arg_peri));
    }

    #[test]
    fn test_mean_anomaly_in_range() {
        let elements = circular_1au();
        for jc in [-2.0, -0.5, 0.0, 0.3, 5.0] {
            let m = elements.mean_anomaly_at(jc);
            assert!((0.0..2.0 * PI).contains(&m));
        }
    }
}
