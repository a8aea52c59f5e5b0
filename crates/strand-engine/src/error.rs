//! Engine error taxonomy.
//!
//! Configuration problems surface at construction; the only runtime
//! failure the tick loop itself can report is a degenerate timestep.
//! Index faults inside workers are contract violations and panic
//! instead, propagating through the dispatch join.

use std::error::Error;
use std::fmt;

/// Errors detected while validating a [`CasterConfig`](crate::CasterConfig).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions below the 2×2 quarter-model minimum.
    GridTooSmall {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },
    /// A grid step is zero, negative, or non-finite.
    InvalidStep {
        /// Which axis, `"dy"` or `"dx"`.
        axis: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The window capacity is zero.
    ZeroCapacity,
    /// The worker count is outside 1..=64.
    InvalidWorkerCount {
        /// The offending count.
        got: usize,
    },
    /// The timestep cap is zero, negative, or non-finite.
    InvalidMaxDt {
        /// The offending value.
        value: f64,
    },
    /// The real-time scale is negative or non-finite.
    InvalidTimeScale {
        /// The offending value.
        value: f64,
    },
    /// The snapshot sampling stride is zero.
    ZeroSnapshotStride,
    /// The snapshot cadence is zero, negative, or non-finite.
    InvalidSnapshotCadence {
        /// The offending value, seconds of simulated time.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { rows, cols } => {
                write!(f, "quarter grid must be at least 2x2, got {rows}x{cols}")
            }
            Self::InvalidStep { axis, value } => {
                write!(f, "grid step {axis} must be finite and positive, got {value}")
            }
            Self::ZeroCapacity => write!(f, "window capacity must be non-zero"),
            Self::InvalidWorkerCount { got } => {
                write!(f, "worker count must be in 1..=64, got {got}")
            }
            Self::InvalidMaxDt { value } => {
                write!(f, "timestep cap must be finite and positive, got {value}")
            }
            Self::InvalidTimeScale { value } => {
                write!(f, "time scale must be finite and non-negative, got {value}")
            }
            Self::ZeroSnapshotStride => write!(f, "snapshot stride must be non-zero"),
            Self::InvalidSnapshotCadence { value } => {
                write!(f, "snapshot cadence must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors constructing a [`Simulation`](crate::Simulation).
#[derive(Debug)]
pub enum EngineError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The worker pool could not be built.
    PoolBuild(rayon::ThreadPoolBuildError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(_) => write!(f, "invalid caster configuration"),
            Self::PoolBuild(_) => write!(f, "failed to build the worker pool"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::PoolBuild(err) => Some(err),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Errors produced by one tick of the simulation loop.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The adaptive timestep came out non-finite or non-positive.
    DegenerateTimestep {
        /// The offending timestep, seconds.
        dt: f64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateTimestep { dt } => {
                write!(f, "adaptive timestep degenerated to {dt}")
            }
        }
    }
}

impl Error for StepError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_chains_to_its_cause() {
        let err = EngineError::from(ConfigError::ZeroCapacity);
        let cause = err.source().expect("source attached");
        assert_eq!(cause.to_string(), "window capacity must be non-zero");
    }
}
