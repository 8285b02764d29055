//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::ease::Ease;

/// Configuration for registry sizing and tween defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity hint for the registry and the per-tick snapshot.
    pub registry_capacity: usize,
    /// Curve assigned to newly constructed tweens.
    pub default_ease: Ease,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_capacity: 64,
            default_ease: Ease::Linear,
        }
    }
}

impl Config {
    /// Parse host configuration; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
