//! Time controller for simulation playback

use hifitime::{Duration, Epoch};

/// Time controller with variable-rate playback.
///
/// The epoch is clamped to J2000 ± 5000 years; the rate is simulated
/// seconds per wall-clock second and may be negative (reverse time).
pub struct TimeController {
    current: Epoch,
    min_epoch: Epoch,
    max_epoch: Epoch,
    /// Simulation rate (sim seconds per real second)
    rate: f64,
    paused: bool,
}

impl TimeController {
    pub fn new() -> Self {
        let j2000 = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);

        Self {
            current: j2000,
            min_epoch: j2000 - Duration::from_days(5000.0 * 365.25),
            max_epoch: j2000 + Duration::from_days(5000.0 * 365.25),
            rate: rates::DAY_PER_SEC,
            paused: false,
        }
    }

    /// Create at specific epoch
    pub fn at_epoch(epoch: Epoch) -> Self {
        let mut tc = Self::new();
        tc.set_time(epoch);
        tc
    }

    pub fn current(&self) -> Epoch {
        self.current
    }

    /// Set absolute time
    pub fn set_time(&mut self, epoch: Epoch) {
        self.current = epoch.clamp(self.min_epoch, self.max_epoch);
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Set simulation rate (sim seconds per real second)
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.clamp(-1e9, 1e9);
    }

    pub fn set_rate_days_per_second(&mut self, days: f64) {
        self.set_rate(days * 86400.0);
    }

    pub fn rate_days_per_second(&self) -> f64 {
        self.rate / 86400.0
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance simulation by real-world delta time. Returns the new epoch.
    pub fn tick(&mut self, real_dt_seconds: f64) -> Epoch {
        if self.paused {
            return self.current;
        }

        let sim_dt = real_dt_seconds * self.rate;
        self.current = (self.current + Duration::from_seconds(sim_dt))
            .clamp(self.min_epoch, self.max_epoch);

        self.current
    }

    /// Jump forward/backward by duration
    pub fn jump(&mut self, duration: Duration) {
        self.current = (self.current + duration).clamp(self.min_epoch, self.max_epoch);
    }

    pub fn jump_to_j2000(&mut self) {
        self.current = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
    }

    /// Get formatted time string
    pub fn format_time(&self) -> String {
        format!("{}", self.current)
    }

    /// Fractional year, e.g. 2000.5 for mid-2000
    pub fn year(&self) -> f64 {
        let j2000 = Epoch::from_gregorian_utc(2000, 1, 1, 12, 0, 0, 0);
        let days = (self.current - j2000).to_seconds() / 86400.0;
        2000.0 + days / 365.25
    }
}

impl Default for TimeController {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset time rates
pub mod rates {
    /// Real-time
    pub const REALTIME: f64 = 1.0;
    /// 1 hour per second
    pub const HOUR_PER_SEC: f64 = 3600.0;
    /// 1 day per second
    pub const DAY_PER_SEC: f64 = 86400.0;
    /// 1 week per second
    pub const WEEK_PER_SEC: f64 = 7.0 * 86400.0;
    /// 1 month per second (~30 days)
    pub const MONTH_PER_SEC: f64 = 30.0 * 86400.0;
    /// 1 year per second
    pub const YEAR_PER_SEC: f64 = 365.25 * 86400.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_tick_is_noop() {
        let mut tc = TimeController::new();
        tc.pause();
        let before = tc.current();
        tc.tick(10.0);
        assert_eq!(tc.current(), before);
    }

    #[test]
    fn test_tick_advances_by_rate() {
        let mut tc = TimeController::new();
        tc.set_rate(rates::DAY_PER_SEC);
        let before = tc.current();
        tc.tick(2.0);
        let advanced = (tc.current() - before).to_seconds();
        assert!((advanced - 2.0 * 86400.0).abs() < 1e-3);
    }

    #[test]
    fn test_negative_rate_runs_backward() {
        let mut tc = TimeController::new();
        tc.set_rate(-rates::DAY_PER_SEC);
        let before = tc.current();
        tc.tick(1.0);
        assert!(tc.current() < before);
    }

    #[test]
    fn test_rate_clamped() {
        let mut tc = TimeController::new();
        tc.set_rate(1e18);
        assert_eq!(tc.rate(), 1e9);
        tc.set_rate(-1e18);
        assert_eq!(tc.rate(), -1e9);
    }

    #[test]
    fn test_epoch_clamped_at_bounds() {
        let mut tc = TimeController::new();

        tc.set_rate(1e9);
        for _ in 0..400 {
            tc.tick(1e6);
        }
        let upper = tc.current();
        tc.tick(1e6);
        assert_eq!(tc.current(), upper, "epoch ran past the upper bound");

        tc.set_rate(-1e9);
        for _ in 0..800 {
            tc.tick(1e6);
        }
        let lower = tc.current();
        tc.tick(1e6);
        assert_eq!(tc.current(), lower, "epoch ran past the lower bound");
    }

    #[test]
    fn test_toggle_pause_roundtrip() {
        let mut tc = TimeController::new();
        assert!(!tc.is_paused());
        tc.toggle_pause();
        assert!(tc.is_paused());
        tc.toggle_pause();
        assert!(!tc.is_paused());
    }

    #[test]
    fn test_jump_and_year() {
        let mut tc = TimeController::new();
        tc.jump(Duration::from_days(365.25));
        assert!((tc.year() - 2001.0).abs() < 0.01);

        tc.jump_to_j2000();
        assert!((tc.year() - 2000.0).abs() < 0.01);
    }

    #[test]
    fn test_rate_days_per_second_roundtrip() {
        let mut tc = TimeController::new();
        tc.set_rate_days_per_second(12.5);
        assert!((tc.rate_days_per_second() - 12.5).abs() < 1e-12);
    }
}
