/// Astronomical unit in meters
pub const AU: f64 = 1.495978707e11;

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00 TDB)
pub const J2000_JD: f64 = 2451545.0;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Days per Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Innermost reference-grid ring (Mercury perihelion, meters)
pub const GRID_R_MIN: f64 = 4.6e10;

/// Logarithmic base for reference-grid ring spacing
pub const GRID_LOG_BASE: f64 = 2.0;

/// Radial spokes in the reference grid
pub const GRID_N_SPOKES: u32 = 24;
