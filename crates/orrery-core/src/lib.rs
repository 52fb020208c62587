pub mod constants;
pub mod coordinates;
pub mod grid;

#[cfg(test)]
mod tests;

pub use coordinates::{normalize_angle, CartesianPosition, SphericalPosition};
pub use grid::{GridConfig, ReferenceGrid};
