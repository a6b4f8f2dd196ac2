//! Process-wide defaults.
//!
//! [`Settings`] holds the grid resolution used by engines that are built
//! without an explicit one, and the day-count basis Theta is quoted in. It
//! is a singleton accessed via a `std::sync::OnceLock`; values live behind a
//! `Mutex` so they can be changed from any thread. Tests that change a
//! setting should restore it when done.

use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::{ensure, Result, Size};

/// Default number of time steps `N`.
pub const DEFAULT_TIME_STEPS: Size = 200;

/// Default number of space steps `M`.
pub const DEFAULT_SPACE_STEPS: Size = 200;

/// Default number of days Theta is divided by.
pub const DEFAULT_THETA_DAYS: f64 = 360.0;

#[derive(Debug, Clone, Copy)]
struct Values {
    time_steps: Size,
    space_steps: Size,
    theta_days: f64,
}

impl Default for Values {
    fn default() -> Self {
        Self {
            time_steps: DEFAULT_TIME_STEPS,
            space_steps: DEFAULT_SPACE_STEPS,
            theta_days: DEFAULT_THETA_DAYS,
        }
    }
}

/// Process-wide settings used by the bsfd library.
pub struct Settings {
    values: Mutex<Values>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            values: Mutex::new(Values::default()),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Values> {
        // Values are plain `Copy` data, a poisoned lock still holds a usable state.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Default `(time_steps, space_steps)` resolution.
    pub fn default_resolution(&self) -> (Size, Size) {
        let v = self.lock();
        (v.time_steps, v.space_steps)
    }

    /// Set the default resolution.
    pub fn set_default_resolution(&self, time_steps: Size, space_steps: Size) -> Result<()> {
        ensure!(time_steps >= 1, "time_steps must be >= 1, got {time_steps}");
        ensure!(space_steps >= 3, "space_steps must be >= 3, got {space_steps}");
        let mut v = self.lock();
        v.time_steps = time_steps;
        v.space_steps = space_steps;
        Ok(())
    }

    /// Days per year used to quote Theta.
    pub fn theta_days(&self) -> f64 {
        self.lock().theta_days
    }

    /// Set the Theta day-count basis.
    pub fn set_theta_days(&self, days: f64) -> Result<()> {
        ensure!(days > 0.0 && days.is_finite(), "theta day basis must be positive, got {days}");
        self.lock().theta_days = days;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_resolution() {
        let s = Settings::instance();
        assert!(s.set_default_resolution(0, 100).is_err());
        assert!(s.set_default_resolution(10, 2).is_err());
        assert!(s.set_theta_days(0.0).is_err());
        assert_eq!(s.default_resolution(), (DEFAULT_TIME_STEPS, DEFAULT_SPACE_STEPS));
    }
}
