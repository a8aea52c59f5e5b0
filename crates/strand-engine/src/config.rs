//! Caster engine configuration.

use crate::error::ConfigError;

/// How a dispatch divides work among the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartitionStrategy {
    /// Split every slice into four disjoint quadrants; each quadrant is
    /// one work item. Suits large cross-sections.
    Quadrant,
    /// Split the slice range evenly across workers; each worker updates
    /// whole slices, traversing cells in spiral order. Suits long
    /// windows of small slices.
    Range,
}

/// Engine-side knobs for one strand simulation.
///
/// Constructed in code and checked once by [`CasterConfig::validate`];
/// the material table and machine description come from their own
/// collaborators.
#[derive(Clone, Debug)]
pub struct CasterConfig {
    /// Quarter-grid rows per slice.
    pub rows: usize,
    /// Quarter-grid columns per slice.
    pub cols: usize,
    /// Grid step along rows, metres.
    pub dy: f64,
    /// Grid step along columns, metres.
    pub dx: f64,
    /// Requested window capacity in slices (rounded up to the field
    /// block size by the containers).
    pub window_capacity: usize,
    /// Compute-pool worker count.
    pub workers: usize,
    /// Work-division strategy per dispatch.
    pub partition: PartitionStrategy,
    /// Upper bound for the adaptive timestep, seconds.
    pub max_dt: f64,
    /// Pace ticks against wall-clock time.
    pub realtime: bool,
    /// Wall-clock seconds per simulated second when pacing. Zero runs
    /// as fast as possible even with `realtime` set.
    pub time_scale: f64,
    /// Cell sampling stride for surface snapshots.
    pub snapshot_stride: usize,
    /// Simulated seconds between snapshot events.
    pub snapshot_cadence_s: f64,
}

impl Default for CasterConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            dy: 0.01,
            dx: 0.01,
            window_capacity: 256,
            workers: 8,
            partition: PartitionStrategy::Quadrant,
            max_dt: 0.25,
            realtime: false,
            time_scale: 1.0,
            snapshot_stride: 1,
            snapshot_cadence_s: 4.0,
        }
    }
}

impl CasterConfig {
    /// Check every field once, before the engine is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(ConfigError::GridTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for (axis, value) in [("dy", self.dy), ("dx", self.dx)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidStep { axis, value });
            }
        }
        if self.window_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.workers == 0 || self.workers > 64 {
            return Err(ConfigError::InvalidWorkerCount { got: self.workers });
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(ConfigError::InvalidMaxDt { value: self.max_dt });
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(ConfigError::InvalidTimeScale {
                value: self.time_scale,
            });
        }
        if self.snapshot_stride == 0 {
            return Err(ConfigError::ZeroSnapshotStride);
        }
        if !(self.snapshot_cadence_s.is_finite() && self.snapshot_cadence_s > 0.0) {
            return Err(ConfigError::InvalidSnapshotCadence {
                value: self.snapshot_cadence_s,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CasterConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_degenerate_grid() {
        let cfg = CasterConfig {
            rows: 1,
            ..CasterConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GridTooSmall { rows: 1, cols: 16 })
        ));
    }

    #[test]
    fn rejects_bad_steps_and_counts() {
        let cfg = CasterConfig {
            dx: 0.0,
            ..CasterConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidStep { axis: "dx", .. })
        ));

        let cfg = CasterConfig {
            workers: 0,
            ..CasterConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidWorkerCount { got: 0 })
        );

        let cfg = CasterConfig {
            time_scale: -1.0,
            ..CasterConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidTimeScale { .. })
        ));
    }
}
