//! Solar system state: epoch-driven propagation for every scene body

use crate::bodies::Body;
use crate::elements::OrbitalElements;
use crate::moons::Moon;
use hifitime::Epoch;
use nalgebra::Vector3;
use orrery_core::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD};
use orrery_core::coordinates::{normalize_angle, CartesianPosition};
use std::collections::HashMap;
use std::f64::consts::PI;

/// Convert hifitime Epoch to Julian centuries from J2000
pub fn epoch_to_jc(epoch: Epoch) -> f64 {
    (epoch.to_jde_utc_days() - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Convert Julian centuries to hifitime Epoch
pub fn jc_to_epoch(jc: f64) -> Epoch {
    Epoch::from_jde_utc(jc * DAYS_PER_JULIAN_CENTURY + J2000_JD)
}

/// Body state at a specific time
#[derive(Clone, Debug)]
pub struct BodyState {
    pub position: CartesianPosition,
    pub velocity: Vector3<f64>,
}

/// Solar system snapshot at a specific epoch
#[derive(Clone, Debug)]
pub struct SystemSnapshot {
    pub epoch: Epoch,
    pub states: HashMap<Body, BodyState>,
}

/// Solar system model with Keplerian propagation.
///
/// Every position is a pure function of the current epoch; nothing
/// accumulates across frames, so pausing and seeking are exact.
pub struct SolarSystem {
    current_epoch: Epoch,
    /// Propagated planet elements at the current epoch
    elements_cache: HashMap<Body, OrbitalElements>,
}

impl SolarSystem {
    /// Create at J2000 epoch
    pub fn new() -> Self {
        Self::at_epoch(Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0))
    }

    /// Create at specific epoch
    pub fn at_epoch(epoch: Epoch) -> Self {
        let mut system = Self {
            current_epoch: epoch,
            elements_cache: HashMap::new(),
        };
        system.update_elements();
        system
    }

    pub fn epoch(&self) -> Epoch {
        self.current_epoch
    }

    /// Set current time and refresh the elements cache
    pub fn set_epoch(&mut self, epoch: Epoch) {
        self.current_epoch = epoch;
        self.update_elements();
    }

    fn update_elements(&mut self) {
        let jc = epoch_to_jc(self.current_epoch);

        for body in Body::planets() {
            if let Some(base) = body.j2000_elements() {
                let propagated = base.propagate(jc, &body.secular_rates());
                self.elements_cache.insert(*body, propagated);
            }
        }
    }

    /// Propagated elements for a planet at the current epoch
    pub fn elements(&self, body: Body) -> Option<&OrbitalElements> {
        self.elements_cache.get(&body)
    }

    /// Heliocentric body position (meters)
    pub fn body_position(&self, body: Body) -> CartesianPosition {
        let jc = epoch_to_jc(self.current_epoch);

        match body {
            Body::Sun => CartesianPosition::new(0.0, 0.0, 0.0),
            _ => {
                if let Some(elements) = self.elements_cache.get(&body) {
                    let pos = elements.position_ecliptic(jc);
                    CartesianPosition::new(pos.x, pos.y, pos.z)
                } else {
                    CartesianPosition::new(0.0, 0.0, 0.0)
                }
            }
        }
    }

    /// Moon offset from its parent body (meters, ecliptic frame)
    pub fn moon_offset(&self, moon: Moon) -> Vector3<f64> {
        let jc = epoch_to_jc(self.current_epoch);
        moon.elements().position_ecliptic(jc)
    }

    /// Heliocentric moon position: parent position + parent-relative offset
    pub fn moon_position(&self, moon: Moon) -> CartesianPosition {
        let parent = self.body_position(moon.parent());
        let rel = self.moon_offset(moon);
        CartesianPosition::new(parent.x + rel.x, parent.y + rel.y, parent.z + rel.z)
    }

    /// Sidereal spin angle of a body at the current epoch, in [0, 2π).
    /// Retrograde rotators (negative period) spin the other way.
    pub fn rotation_angle(&self, body: Body) -> f64 {
        let period_h = body.rotation_period_hours();
        if period_h == 0.0 {
            return 0.0;
        }
        let hours = epoch_to_jc(self.current_epoch) * DAYS_PER_JULIAN_CENTURY * 24.0;
        normalize_angle(2.0 * PI * hours / period_h)
    }

    /// Get body state (position + velocity)
    pub fn body_state(&self, body: Body) -> BodyState {
        let jc = epoch_to_jc(self.current_epoch);
        let position = self.body_position(body);

        let velocity = match body {
            Body::Sun => Vector3::zeros(),
            _ => {
                if let Some(elements) = self.elements_cache.get(&body) {
                    elements.velocity_ecliptic(jc)
                } else {
                    Vector3::zeros()
                }
            }
        };

        BodyState { position, velocity }
    }

    /// Get snapshot of the entire system
    pub fn snapshot(&self) -> SystemSnapshot {
        let mut states = HashMap::new();

        for body in Body::all() {
            states.insert(*body, self.body_state(*body));
        }

        SystemSnapshot {
            epoch: self.current_epoch,
            states,
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::constants::AU;

    #[test]
    fn test_sun_at_origin() {
        let system = SolarSystem::new();
        let sun = system.body_position(Body::Sun);
        assert_eq!(sun.magnitude(), 0.0);
    }

    #[test]
    fn test_earth_distance_at_j2000() {
        let system = SolarSystem::new();
        let earth = system.body_position(Body::Earth);
        let au = earth.magnitude() / AU;
        assert!((au - 1.0).abs() < 0.02, "Earth at {} AU", au);
    }

    #[test]
    fn test_positions_pure_in_epoch() {
        // Seeking away and back reproduces positions exactly
        let mut system = SolarSystem::new();
        let before = system.body_position(Body::Mars);

        system.set_epoch(Epoch::from_gregorian_utc(2030, 6, 1, 0, 0, 0, 0));
        let _ = system.body_position(Body::Mars);

        system.set_epoch(Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0));
        let after = system.body_position(Body::Mars);

        assert!((before.x - after.x).abs() < 1.0);
        assert!((before.y - after.y).abs() < 1.0);
        assert!((before.z - after.z).abs() < 1.0);
    }

    #[test]
    fn test_moon_stays_near_parent() {
        let mut system = SolarSystem::new();

        for step in 0..12 {
            system.set_epoch(Epoch::from_gregorian_utc(2000 + step, 3, 1, 0, 0, 0, 0));
            let moon = system.moon_position(Moon::Luna);
            let earth = system.body_position(Body::Earth);
            let dist = moon.distance_to(&earth);

            // Within the apsides of the lunar orbit
            assert!(dist > 3.5e8 && dist < 4.2e8, "Moon at {} m from Earth", dist);
        }
    }

    #[test]
    fn test_moon_offset_magnitude() {
        let system = SolarSystem::new();

        // Low-eccentricity moons sit near their semi-major axis
        for moon in [Moon::Io, Moon::Ganymede, Moon::Deimos] {
            let a = moon.elements().a;
            let r = system.moon_offset(moon).norm();
            assert!(
                (r - a).abs() < a * 0.05,
                "{} offset {} vs a {}",
                moon.name(),
                r,
                a
            );
        }
    }

    #[test]
    fn test_rotation_angle_range_and_motion() {
        let mut system = SolarSystem::new();
        let a0 = system.rotation_angle(Body::Earth);
        assert!((0.0..2.0 * PI).contains(&a0));

        // Six hours later Earth has turned about a quarter revolution
        system.set_epoch(Epoch::from_gregorian_utc(2000, 1, 1, 18, 0, 0, 0));
        let a1 = system.rotation_angle(Body::Earth);
        let delta = normalize_angle(a1 - a0);
        assert!((delta - PI / 2.0).abs() < 0.02, "delta = {}", delta);
    }

    #[test]
    fn test_snapshot_covers_all_bodies() {
        let system = SolarSystem::new();
        let snap = system.snapshot();
        assert_eq!(snap.states.len(), Body::all().len());
    }

    #[test]
    fn test_velocity_order_of_magnitude() {
        let system = SolarSystem::new();
        let v = system.body_state(Body::Earth).velocity.norm();
        // Earth's heliocentric speed ~29.8 km/s
        assert!((v - 29800.0).abs() < 1500.0, "v = {} m/s", v);
    }
}
