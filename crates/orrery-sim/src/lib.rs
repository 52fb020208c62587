pub mod belts;
pub mod bodies;
pub mod elements;
pub mod moons;
pub mod system;
pub mod time_controller;

pub use belts::{generate_belt, BeltParticle, BeltSpec};
pub use bodies::{Body, BodyFacts, RingSpec, MU_SUN};
pub use elements::{OrbitalElements, SecularRates};
pub use moons::Moon;
pub use system::{epoch_to_jc, jc_to_epoch, BodyState, SolarSystem, SystemSnapshot};
pub use time_controller::{rates, TimeController};
