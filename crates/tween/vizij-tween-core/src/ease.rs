//! Easing curves (Penner set).
//!
//! `ease` maps linear progress to eased progress. Inputs are not clamped and
//! the back/elastic families deliberately leave [0, 1].

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TweenError;

/// Easing curve selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,

    InQuad,
    OutQuad,
    InOutQuad,

    InCubic,
    OutCubic,
    InOutCubic,

    InQuart,
    OutQuart,
    InOutQuart,

    InQuint,
    OutQuint,
    InOutQuint,

    InSine,
    OutSine,
    InOutSine,

    InExpo,
    OutExpo,
    InOutExpo,

    InCirc,
    OutCirc,
    InOutCirc,

    /// Overshoots below 0 near the start
    InBack,
    /// Overshoots above 1 near the end
    OutBack,
    InOutBack,

    InElastic,
    OutElastic,
    InOutElastic,

    InBounce,
    OutBounce,
    InOutBounce,
}

impl Ease {
    /// Every curve, in declaration order. Indexes match `TryFrom<u8>`.
    pub const ALL: [Ease; 31] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InQuint,
        Ease::OutQuint,
        Ease::InOutQuint,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
        Ease::InCirc,
        Ease::OutCirc,
        Ease::InOutCirc,
        Ease::InBack,
        Ease::OutBack,
        Ease::InOutBack,
        Ease::InElastic,
        Ease::OutElastic,
        Ease::InOutElastic,
        Ease::InBounce,
        Ease::OutBounce,
        Ease::InOutBounce,
    ];

    /// Get the snake_case name of this curve
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "in_quad",
            Self::OutQuad => "out_quad",
            Self::InOutQuad => "in_out_quad",
            Self::InCubic => "in_cubic",
            Self::OutCubic => "out_cubic",
            Self::InOutCubic => "in_out_cubic",
            Self::InQuart => "in_quart",
            Self::OutQuart => "out_quart",
            Self::InOutQuart => "in_out_quart",
            Self::InQuint => "in_quint",
            Self::OutQuint => "out_quint",
            Self::InOutQuint => "in_out_quint",
            Self::InSine => "in_sine",
            Self::OutSine => "out_sine",
            Self::InOutSine => "in_out_sine",
            Self::InExpo => "in_expo",
            Self::OutExpo => "out_expo",
            Self::InOutExpo => "in_out_expo",
            Self::InCirc => "in_circ",
            Self::OutCirc => "out_circ",
            Self::InOutCirc => "in_out_circ",
            Self::InBack => "in_back",
            Self::OutBack => "out_back",
            Self::InOutBack => "in_out_back",
            Self::InElastic => "in_elastic",
            Self::OutElastic => "out_elastic",
            Self::InOutElastic => "in_out_elastic",
            Self::InBounce => "in_bounce",
            Self::OutBounce => "out_bounce",
            Self::InOutBounce => "in_out_bounce",
        }
    }

    /// Apply this curve to linear progress `t`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        ease(self, t)
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Squash a curve name to lowercase alphanumerics without an `ease` prefix,
/// so `EaseInOutBack`, `in_out_back` and `in-out-back` compare equal.
fn squash(name: &str) -> String {
    let squashed: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match squashed.strip_prefix("ease") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => squashed,
    }
}

impl FromStr for Ease {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        Ease::ALL
            .iter()
            .copied()
            .find(|curve| squash(curve.name()) == wanted)
            .ok_or_else(|| TweenError::UnknownEase {
                name: s.to_string(),
            })
    }
}

impl TryFrom<u8> for Ease {
    type Error = TweenError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Ease::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| TweenError::UnknownEase {
                name: index.to_string(),
            })
    }
}

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

/// Map linear progress `t` through `curve`.
pub fn ease(curve: Ease, t: f32) -> f32 {
    match curve {
        Ease::Linear => t,

        Ease::InQuad => t * t,
        Ease::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        Ease::InOutQuad => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }

        Ease::InCubic => t * t * t,
        Ease::OutCubic => 1.0 - (1.0 - t).powi(3),
        Ease::InOutCubic => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }

        Ease::InQuart => t.powi(4),
        Ease::OutQuart => 1.0 - (1.0 - t).powi(4),
        Ease::InOutQuart => {
            if t < 0.5 {
                8.0 * t.powi(4)
            } else {
                1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
            }
        }

        Ease::InQuint => t.powi(5),
        Ease::OutQuint => 1.0 - (1.0 - t).powi(5),
        Ease::InOutQuint => {
            if t < 0.5 {
                16.0 * t.powi(5)
            } else {
                1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
            }
        }

        Ease::InSine => 1.0 - (t * PI / 2.0).cos(),
        Ease::OutSine => (t * PI / 2.0).sin(),
        Ease::InOutSine => -((PI * t).cos() - 1.0) / 2.0,

        Ease::InExpo => {
            if t == 0.0 {
                0.0
            } else {
                2.0_f32.powf(10.0 * t - 10.0)
            }
        }
        Ease::OutExpo => {
            if t == 1.0 {
                1.0
            } else {
                1.0 - 2.0_f32.powf(-10.0 * t)
            }
        }
        Ease::InOutExpo => {
            if t == 0.0 {
                0.0
            } else if t == 1.0 {
                1.0
            } else if t < 0.5 {
                2.0_f32.powf(20.0 * t - 10.0) / 2.0
            } else {
                (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
            }
        }

        // radicands floored at 0 so out-of-range input stays finite
        Ease::InCirc => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
        Ease::OutCirc => (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt(),
        Ease::InOutCirc => {
            if t < 0.5 {
                (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
            } else {
                ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
            }
        }

        Ease::InBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
        Ease::OutBack => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
        Ease::InOutBack => {
            if t < 0.5 {
                ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
            } else {
                ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0)
                    / 2.0
            }
        }

        Ease::InElastic => {
            if t == 0.0 {
                0.0
            } else if t == 1.0 {
                1.0
            } else {
                -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
            }
        }
        Ease::OutElastic => {
            if t == 0.0 {
                0.0
            } else if t == 1.0 {
                1.0
            } else {
                2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
            }
        }
        Ease::InOutElastic => {
            if t == 0.0 {
                0.0
            } else if t == 1.0 {
                1.0
            } else if t < 0.5 {
                -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
            } else {
                (2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                    + 1.0
            }
        }

        Ease::InBounce => 1.0 - out_bounce(1.0 - t),
        Ease::OutBounce => out_bounce(t),
        Ease::InOutBounce => {
            if t < 0.5 {
                (1.0 - out_bounce(1.0 - 2.0 * t)) / 2.0
            } else {
                (1.0 + out_bounce(2.0 * t - 1.0)) / 2.0
            }
        }
    }
}

fn out_bounce(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}
