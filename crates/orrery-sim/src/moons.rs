//! Moon catalog: parent-relative orbital elements
//!
//! Osculating elements relative to the parent body, used for display
//! placement. The parent's gravitational parameter drives the period.

use crate::bodies::Body;
use crate::elements::OrbitalElements;
use std::f64::consts::PI;

/// Gravitational parameters of the moon-bearing parents (m³/s²)
const MU_EARTH: f64 = 3.986004418e14;
const MU_MARS: f64 = 4.282837e13;
const MU_JUPITER: f64 = 1.26686534e17;
const MU_SATURN: f64 = 3.7931187e16;

/// The moons rendered by the scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Moon {
    Luna,
    Phobos,
    Deimos,
    Io,
    Europa,
    Ganymede,
    Callisto,
    Titan,
}

impl Moon {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Luna => "Moon",
            Self::Phobos => "Phobos",
            Self::Deimos => "Deimos",
            Self::Io => "Io",
            Self::Europa => "Europa",
            Self::Ganymede => "Ganymede",
            Self::Callisto => "Callisto",
            Self::Titan => "Titan",
        }
    }

    pub fn parent(&self) -> Body {
        match self {
            Self::Luna => Body::Earth,
            Self::Phobos | Self::Deimos => Body::Mars,
            Self::Io | Self::Europa | Self::Ganymede | Self::Callisto => Body::Jupiter,
            Self::Titan => Body::Saturn,
        }
    }

    /// Mean radius in meters
    pub fn radius(&self) -> f64 {
        match self {
            Self::Luna => 1.7374e6,
            Self::Phobos => 1.1267e4,
            Self::Deimos => 6.2e3,
            Self::Io => 1.8216e6,
            Self::Europa => 1.5608e6,
            Self::Ganymede => 2.6341e6,
            Self::Callisto => 2.4103e6,
            Self::Titan => 2.5747e6,
        }
    }

    /// Flat color used until (or instead of) a texture
    pub fn base_color(&self) -> [f32; 3] {
        match self {
            Self::Luna => [0.65, 0.65, 0.62],
            Self::Phobos => [0.45, 0.4, 0.36],
            Self::Deimos => [0.5, 0.46, 0.42],
            Self::Io => [0.85, 0.78, 0.45],
            Self::Europa => [0.75, 0.7, 0.62],
            Self::Ganymede => [0.55, 0.52, 0.48],
            Self::Callisto => [0.4, 0.38, 0.35],
            Self::Titan => [0.82, 0.65, 0.35],
        }
    }

    /// Parent-centric orbital elements at J2000
    pub fn elements(&self) -> OrbitalElements {
        let deg = PI / 180.0;

        match self {
            Self::Luna => OrbitalElements::new(
                384400e3,
                0.0549,
                5.145 * deg,
                125.08 * deg,
                318.15 * deg,
                135.27 * deg,
                0.0,
                MU_EARTH,
            ),

            Self::Phobos => OrbitalElements::new(
                9376e3,
                0.0151,
                1.093 * deg,
                0.0,
                150.057 * deg,
                91.059 * deg,
                0.0,
                MU_MARS,
            ),

            Self::Deimos => OrbitalElements::new(
                23463e3,
                0.00033,
                0.93 * deg,
                0.0,
                260.729 * deg,
                325.329 * deg,
                0.0,
                MU_MARS,
            ),

            Self::Io => OrbitalElements::new(
                421800e3,
                0.0041,
                0.036 * deg,
                43.977 * deg,
                84.129 * deg,
                342.021 * deg,
                0.0,
                MU_JUPITER,
            ),

            Self::Europa => OrbitalElements::new(
                671100e3,
                0.0094,
                0.466 * deg,
                219.106 * deg,
                88.97 * deg,
                171.016 * deg,
                0.0,
                MU_JUPITER,
            ),

            Self::Ganymede => OrbitalElements::new(
                1070400e3,
                0.0013,
                0.177 * deg,
                63.552 * deg,
                192.417 * deg,
                317.54 * deg,
                0.0,
                MU_JUPITER,
            ),

            Self::Callisto => OrbitalElements::new(
                1882700e3,
                0.0074,
                0.192 * deg,
                298.848 * deg,
                52.643 * deg,
                181.408 * deg,
                0.0,
                MU_JUPITER,
            ),

            Self::Titan => OrbitalElements::new(
                1221870e3,
                0.0288,
                0.34854 * deg,
                78.6 * deg,
                78.3 * deg,
                11.7 * deg,
                0.0,
                MU_SATURN,
            ),
        }
    }

    /// Moons of a given body, innermost first
    pub fn of(body: Body) -> &'static [Moon] {
        match body {
            Body::Earth => &[Self::Luna],
            Body::Mars => &[Self::Phobos, Self::Deimos],
            Body::Jupiter => &[Self::Io, Self::Europa, Self::Ganymede, Self::Callisto],
            Body::Saturn => &[Self::Titan],
            _ => &[],
        }
    }

    pub fn all() -> &'static [Moon] {
        &[
            Self::Luna,
            Self::Phobos,
            Self::Deimos,
            Self::Io,
            Self::Europa,
            Self::Ganymede,
            Self::Callisto,
            Self::Titan,
        ]
    }
}
