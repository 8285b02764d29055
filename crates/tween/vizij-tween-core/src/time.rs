//! Frame time input for the tween registry.

/// One frame of elapsed time on both clocks, in seconds.
///
/// `scaled` is subject to the host's global time scale (slow motion, pause
/// menus); `unscaled` is always real time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeStep {
    pub scaled: f32,
    pub unscaled: f32,
}

impl TimeStep {
    #[inline]
    pub fn new(scaled: f32, unscaled: f32) -> Self {
        Self { scaled, unscaled }
    }

    /// Same delta on both clocks (time scale of 1).
    #[inline]
    pub fn uniform(dt: f32) -> Self {
        Self {
            scaled: dt,
            unscaled: dt,
        }
    }

    /// Pick the clock a tween runs on.
    #[inline]
    pub fn select(&self, ignore_time_scale: bool) -> f32 {
        if ignore_time_scale {
            self.unscaled
        } else {
            self.scaled
        }
    }
}
