//! Engine for the strand thermal simulator: configuration, the fixed
//! worker-pool scheduler, the per-strand tick loop, surface snapshots,
//! and the background runner thread.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod metrics;
mod runner;
mod scheduler;
mod sim;
mod snapshot;

pub use config::{CasterConfig, PartitionStrategy};
pub use error::{ConfigError, EngineError, StepError};
pub use metrics::TickMetrics;
pub use runner::{StrandEvent, StrandRunner};
pub use scheduler::CaseScheduler;
pub use sim::{CastPhase, Simulation};
pub use snapshot::{FaceId, FaceSample, SectionRanges, SnapshotCadence, SurfaceSnapshot};
