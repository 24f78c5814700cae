//! Step-count policies.
//!
//! A Trotterized evolution is configured either by a fixed number of slices
//! (`n_trotter`) or by a fixed slice length (`time_step`). With a fixed slice
//! length the number of repetitions is derived from the requested time,
//! which must be a whole multiple of the step.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Decimal digits kept when rounding `|t| / time_step` before the
/// integrality check.
pub const STEP_ROUNDING_DECIMALS: i32 = 12;

/// Maximum distance of the rounded step ratio from an integer.
pub const STEP_TOLERANCE: f64 = 1e-12;

/// How the number of Trotter slices is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// A fixed number of slices regardless of evolution time.
    FixedStep {
        /// Number of Trotter slices.
        n_trotter: usize,
    },
    /// Slices of fixed duration; the count follows from the evolution time.
    FixedInterval {
        /// Duration of one slice.
        time_step: f64,
    },
}

impl StepPolicy {
    /// Resolve a policy from optional settings; exactly one must be given.
    pub fn from_options(time_step: Option<f64>, n_trotter: Option<usize>) -> SimResult<Self> {
        let policy = match (time_step, n_trotter) {
            (Some(time_step), None) => StepPolicy::FixedInterval { time_step },
            (None, Some(n_trotter)) => StepPolicy::FixedStep { n_trotter },
            _ => {
                return Err(SimError::StepPolicyConflict {
                    time_step,
                    n_trotter,
                });
            }
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the policy's own parameter.
    pub fn validate(&self) -> SimResult<()> {
        match *self {
            StepPolicy::FixedStep { n_trotter } if n_trotter == 0 => {
                Err(SimError::InvalidSteps(n_trotter))
            }
            StepPolicy::FixedInterval { time_step } => validate_time_step(time_step),
            StepPolicy::FixedStep { .. } => Ok(()),
        }
    }
}

/// Repetitions of the unit circuit and direction of evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCount {
    /// Number of unit-circuit repetitions.
    pub repetitions: usize,
    /// −1 for backward evolution, 0 for zero time, +1 otherwise.
    pub sign: i8,
}

/// Number of `time_step` slices needed to reach `evolution_time`.
///
/// `|evolution_time| / time_step` is rounded to [`STEP_ROUNDING_DECIMALS`]
/// digits; the result must lie within [`STEP_TOLERANCE`] of an integer and
/// fit in a `usize`.
pub fn evolution_trotter_step(time_step: f64, evolution_time: f64) -> SimResult<StepCount> {
    validate_time_step(time_step)?;
    let non_integer = || SimError::NonIntegerStep {
        evolution_time,
        time_step,
    };
    if !evolution_time.is_finite() {
        return Err(non_integer());
    }

    let ratio = round_to_decimals(evolution_time.abs() / time_step, STEP_ROUNDING_DECIMALS);
    let nearest = ratio.round();
    // usize::MAX rounds up to 2^64 as f64, so every accepted value casts exactly.
    #[allow(clippy::cast_precision_loss)]
    let limit = usize::MAX as f64;
    if !nearest.is_finite() || nearest >= limit {
        return Err(SimError::StepCountOverflow {
            evolution_time,
            time_step,
        });
    }
    if (ratio - nearest).abs() > STEP_TOLERANCE {
        return Err(non_integer());
    }

    let sign = if evolution_time > 0.0 {
        1
    } else if evolution_time < 0.0 {
        -1
    } else {
        0
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let repetitions = nearest as usize;
    Ok(StepCount { repetitions, sign })
}

// ---- Internal helpers ----

fn validate_time_step(time_step: f64) -> SimResult<()> {
    if time_step.is_finite() && time_step > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimeStep(time_step))
    }
}

fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    // Past 2^52 the value carries no digits below the rounding grid.
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    scaled.round() / scale
}
