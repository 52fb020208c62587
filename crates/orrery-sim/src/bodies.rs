//! Body catalog: orbital elements and physical properties
//!
//! Orbital data from JPL Horizons and NASA fact sheets, epoch J2000.0.

use crate::elements::{OrbitalElements, SecularRates};
use std::f64::consts::PI;

/// Gravitational parameter of the Sun (m³/s²)
pub const MU_SUN: f64 = 1.32712440018e20;

/// The Sun and the nine orbiting bodies of the scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// A body's ring system (meters from the body center)
#[derive(Clone, Copy, Debug)]
pub struct RingSpec {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub tint: [f32; 3],
}

/// Fact sheet used by the info pages
#[derive(Clone, Debug, serde::Serialize)]
pub struct BodyFacts {
    pub name: &'static str,
    pub mean_radius_km: f64,
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub orbital_period_days: f64,
    pub rotation_period_hours: f64,
    pub axial_tilt_deg: f64,
    pub moons: Vec<&'static str>,
    pub has_rings: bool,
}

impl Body {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }

    /// Parse a body name, case-insensitively
    pub fn parse(name: &str) -> Option<Body> {
        Body::all()
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Mean radius in meters
    pub fn radius(&self) -> f64 {
        match self {
            Self::Sun => 6.9634e8,
            Self::Mercury => 2.4397e6,
            Self::Venus => 6.0518e6,
            Self::Earth => 6.371e6,
            Self::Mars => 3.3895e6,
            Self::Jupiter => 6.9911e7,
            Self::Saturn => 5.8232e7,
            Self::Uranus => 2.5362e7,
            Self::Neptune => 2.4622e7,
            Self::Pluto => 1.188e6,
        }
    }

    /// Sidereal rotation period in hours; negative for retrograde spin
    pub fn rotation_period_hours(&self) -> f64 {
        match self {
            Self::Sun => 609.12,
            Self::Mercury => 1407.6,
            Self::Venus => -5832.5,
            Self::Earth => 23.934,
            Self::Mars => 24.623,
            Self::Jupiter => 9.925,
            Self::Saturn => 10.656,
            Self::Uranus => -17.24,
            Self::Neptune => 16.11,
            Self::Pluto => -153.29,
        }
    }

    /// Axial tilt relative to the orbital plane (radians)
    pub fn axial_tilt(&self) -> f64 {
        let deg = PI / 180.0;
        match self {
            Self::Sun => 7.25 * deg,
            Self::Mercury => 0.034 * deg,
            Self::Venus => 177.4 * deg,
            Self::Earth => 23.44 * deg,
            Self::Mars => 25.19 * deg,
            Self::Jupiter => 3.13 * deg,
            Self::Saturn => 26.73 * deg,
            Self::Uranus => 97.77 * deg,
            Self::Neptune => 28.32 * deg,
            Self::Pluto => 122.53 * deg,
        }
    }

    /// Flat color used until (or instead of) a texture
    pub fn base_color(&self) -> [f32; 3] {
        match self {
            Self::Sun => [1.0, 0.9, 0.55],
            Self::Mercury => [0.55, 0.5, 0.45],
            Self::Venus => [0.85, 0.72, 0.45],
            Self::Earth => [0.25, 0.45, 0.75],
            Self::Mars => [0.72, 0.35, 0.2],
            Self::Jupiter => [0.75, 0.62, 0.45],
            Self::Saturn => [0.8, 0.72, 0.5],
            Self::Uranus => [0.55, 0.75, 0.8],
            Self::Neptune => [0.3, 0.42, 0.8],
            Self::Pluto => [0.6, 0.55, 0.5],
        }
    }

    /// Orbital period in Earth days
    pub fn orbital_period_days(&self) -> f64 {
        match self {
            Self::Sun => 0.0,
            Self::Mercury => 87.97,
            Self::Venus => 224.70,
            Self::Earth => 365.26,
            Self::Mars => 686.98,
            Self::Jupiter => 4332.59,
            Self::Saturn => 10759.22,
            Self::Uranus => 30688.5,
            Self::Neptune => 60182.0,
            Self::Pluto => 90560.0,
        }
    }

    /// Ring system, for the two bodies that have one in the scene
    pub fn rings(&self) -> Option<RingSpec> {
        match self {
            Self::Saturn => Some(RingSpec {
                inner_radius: 7.45e7,  // C ring inner edge
                outer_radius: 1.37e8,  // A ring outer edge
                tint: [0.8, 0.72, 0.55],
            }),
            Self::Uranus => Some(RingSpec {
                inner_radius: 3.8e7,   // zeta
                outer_radius: 5.12e7,  // epsilon
                tint: [0.45, 0.55, 0.6],
            }),
            _ => None,
        }
    }

    /// Orbital elements at J2000. None for the Sun (it's the center).
    pub fn j2000_elements(&self) -> Option<OrbitalElements> {
        let deg = PI / 180.0;

        match self {
            Self::Sun => None,

            Self::Mercury => Some(OrbitalElements::new(
                57.909e9,
                0.20563,
                7.005 * deg,
                48.331 * deg,
                29.124 * deg,
                174.796 * deg,
                0.0,
                MU_SUN,
            )),

            Self::Venus => Some(OrbitalElements::new(
                108.21e9,
                0.00677,
                3.3946 * deg,
                76.680 * deg,
                54.884 * deg,
                50.115 * deg,
                0.0,
                MU_SUN,
            )),

            Self::Earth => Some(OrbitalElements::new(
                149.598e9,
                0.01671,
                0.00005 * deg,
                -11.26064 * deg, // node ill-defined at i≈0; vernal equinox convention
                102.94719 * deg,
                100.46435 * deg,
                0.0,
                MU_SUN,
            )),

            Self::Mars => Some(OrbitalElements::new(
                227.956e9,
                0.0934,
                1.850 * deg,
                49.558 * deg,
                286.502 * deg,
                19.373 * deg,
                0.0,
                MU_SUN,
            )),

            Self::Jupiter => Some(OrbitalElements::new(
                778.479e9,
                0.0489,
                1.303 * deg,
                100.464 * deg,
                273.867 * deg,
                20.020 * deg,
                0.0,
                MU_SUN,
            )),

            Self::Saturn => Some(OrbitalElements::new(
                1432.041e9,
                0.0565,
                2.485 * deg,
                113.665 * deg,
                339.392 * deg,
                317.020 * deg,
                0.0,
                MU_SUN,
            )),

            Self::Uranus => Some(OrbitalElements::new(
                2867.043e9,
                0.0457,
                0.773 * deg,
                74.006 * deg,
                96.998857 * deg,
                142.2386 * deg,
                0.0,
                MU_SUN,
            )),

            Self::Neptune => Some(OrbitalElements::new(
                4514.953e9,
                0.0113,
                1.770 * deg,
                131.784 * deg,
                273.187 * deg,
                256.228 * deg,
                0.0,
                MU_SUN,
            )),

            Self::Pluto => Some(OrbitalElements::new(
                5869.656e9,
                0.2488,
                17.16 * deg,
                110.299 * deg,
                113.834 * deg,
                14.53 * deg,
                0.0,
                MU_SUN,
            )),
        }
    }

    /// Secular perturbation rates (per Julian century), from JPL
    pub fn secular_rates(&self) -> SecularRates {
        let deg = PI / 180.0;

        match self {
            Self::Sun => SecularRates::default(),

            Self::Mercury => SecularRates {
                da: 0.0,
                de: 0.00002123,
                di: -0.00590 * deg,
                d_raan: -0.12534 * deg,
                d_arg_peri: 0.16047 * deg,
            },

            Self::Venus => SecularRates {
                da: 0.0,
                de: -0.00004938,
                di: -0.00078 * deg,
                d_raan: -0.27769 * deg,
                d_arg_peri: 0.00268 * deg,
            },

            Self::Earth => SecularRates {
                da: 0.0,
                de: -0.00004392,
                di: -0.01337 * deg,
                d_raan: -0.18047 * deg,
                d_arg_peri: 0.32327 * deg,
            },

            Self::Mars => SecularRates {
                da: 0.0,
                de: 0.00007882,
                di: -0.00813 * deg,
                d_raan: -0.29257 * deg,
                d_arg_peri: 0.44106 * deg,
            },

            Self::Jupiter => SecularRates {
                da: 0.0,
                de: -0.00012880,
                di: -0.00242 * deg,
                d_raan: 0.18966 * deg,
                d_arg_peri: 0.17693 * deg,
            },

            Self::Saturn => SecularRates {
                da: 0.0,
                de: -0.00050991,
                di: 0.00193 * deg,
                d_raan: -0.26731 * deg,
                d_arg_peri: -0.42568 * deg,
            },

            Self::Uranus => SecularRates {
                da: 0.0,
                de: -0.00020455,
                di: 0.00041 * deg,
                d_raan: 0.01140 * deg,
                d_arg_peri: 0.02768 * deg,
            },

            Self::Neptune => SecularRates {
                da: 0.0,
                de: 0.00006171,
                di: -0.00333 * deg,
                d_raan: -0.01022 * deg,
                d_arg_peri: -0.01043 * deg,
            },

            // Poorly constrained
            Self::Pluto => SecularRates::default(),
        }
    }

    /// Fact sheet for the info pages
    pub fn facts(&self) -> BodyFacts {
        let elements = self.j2000_elements();
        let (a_au, e, i_deg) = match &elements {
            Some(el) => (
                el.a / orrery_core::constants::AU,
                el.e,
                el.i.to_degrees(),
            ),
            None => (0.0, 0.0, 0.0),
        };

        BodyFacts {
            name: self.name(),
            mean_radius_km: self.radius() / 1000.0,
            semi_major_axis_au: a_au,
            eccentricity: e,
            inclination_deg: i_deg,
            orbital_period_days: self.orbital_period_days(),
            rotation_period_hours: self.rotation_period_hours(),
            axial_tilt_deg: self.axial_tilt().to_degrees(),
            moons: crate::moons::Moon::of(*self).iter().map(|m| m.name()).collect(),
            has_rings: self.rings().is_some(),
        }
    }

    /// All bodies including the Sun
    pub fn all() -> &'static [Body] {
        &[
            Self::Sun,
            Self::Mercury,
            Self::Venus,
            Self::Earth,
            Self::Mars,
            Self::Jupiter,
            Self::Saturn,
            Self::Uranus,
            Self::Neptune,
            Self::Pluto,
        ]
    }

    /// The nine orbiting bodies (no Sun)
    pub fn planets() -> &'static [Body] {
        &[
            Self::Mercury,
            Self::Venus,
            Self::Earth,
            Self::Mars,
            Self::Jupiter,
            Self::Saturn,
            Self::Uranus,
            Self::Neptune,
            Self::Pluto,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::constants::AU;

    #[test]
    fn test_nine_planets() {
        assert_eq!(Body::planets().len(), 9);
        assert_eq!(Body::all().len(), 10);
        assert!(!Body::planets().contains(&Body::Sun));
    }

    #[test]
    fn test_earth_at_one_au() {
        let a = Body::Earth.j2000_elements().unwrap().a;
        assert!((a / AU - 1.0).abs() < 0.01, "Earth a = {} AU", a / AU);
    }

    #[test]
    fn test_periods_increase_outward() {
        let planets = Body::planets();
        for pair in planets.windows(2) {
            assert!(
                pair[1].orbital_period_days() > pair[0].orbital_period_days(),
                "{} should orbit slower than {}",
                pair[1].name(),
                pair[0].name()
            );
        }
    }

    #[test]
    fn test_element_periods_match_catalog() {
        // Kepler-derived period should agree with the catalog period
        for body in Body::planets() {
            let el = body.j2000_elements().unwrap();
            let days = el.period() / orrery_core::constants::SECONDS_PER_DAY;
            let catalog = body.orbital_period_days();
            let rel = (days - catalog).abs() / catalog;
            assert!(rel < 0.01, "{}: {} vs {} days", body.name(), days, catalog);
        }
    }

    #[test]
    fn test_two_ring_systems() {
        let ringed: Vec<_> = Body::all().iter().filter(|b| b.rings().is_some()).collect();
        assert_eq!(ringed.len(), 2);
        assert!(Body::Saturn.rings().is_some());
        assert!(Body::Uranus.rings().is_some());

        for body in [Body::Saturn, Body::Uranus] {
            let spec = body.rings().unwrap();
            assert!(spec.inner_radius > body.radius());
            assert!(spec.outer_radius > spec.inner_radius);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Body::parse("earth"), Some(Body::Earth));
        assert_eq!(Body::parse("PLUTO"), Some(Body::Pluto));
        assert_eq!(Body::parse("Vulcan"), None);
    }

    #[test]
    fn test_facts_for_saturn() {
        let facts = Body::Saturn.facts();
        assert!(facts.has_rings);
        assert!(facts.moons.contains(&"Titan"));
        assert!((facts.semi_major_axis_au - 9.57).abs() < 0.1);
    }
}
