//! FILENAME: core/engine/src/config.rs
//! PURPOSE: Tunable constants of the numeric function engine.
//! CONTEXT: Embedded in the application config file under `numeric`. The same
//! values are handed to the script emitter so exported scripts reproduce the
//! in-process numbers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    /// Step h of the central difference.
    pub derivative_step: f64,
    /// Number of points of the trapezoid grid used for integrals.
    pub integral_samples: usize,
    /// Hard cap on grid sizes accepted by `sample`.
    pub max_points: usize,
    /// Display range used when a curve has no finite value at all.
    pub default_range: (f64, f64),
    /// Padding added on both sides of a flat curve.
    pub range_padding: f64,
}

impl Default for NumericConfig {
    fn default() -> Self {
        NumericConfig {
            derivative_step: 1e-4,
            integral_samples: 1600,
            max_points: 100_000,
            default_range: (-1.0, 1.0),
            range_padding: 1.0,
        }
    }
}
