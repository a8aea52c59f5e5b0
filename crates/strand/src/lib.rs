//! Real-time thermal field simulator for continuously-cast steel strands.
//!
//! A strand is modelled as a sliding window of quarter cross-section
//! slices travelling down the casting machine. Each tick an explicit
//! finite-difference stencil updates every cell of every live slice
//! against the previous-tick field, the adaptive timestep keeps the
//! update stable, and the window advances as the strand travels past
//! the meniscus.
//!
//! # Quick start
//!
//! ```
//! use indexmap::IndexMap;
//! use strand::engine::{CasterConfig, Simulation};
//! use strand::types::{CastingMachine, CoolingZone, MaterialTable, ZoneKind};
//!
//! // A flat one-bucket-per-property table with an identity
//! // enthalpy-to-temperature mapping.
//! let table = MaterialTable::new(
//!     0.0,
//!     5.0e4,
//!     vec![7500.0; 20],
//!     vec![2.0e5; 20],
//!     vec![30.0; 20],
//!     vec![650.0; 20],
//!     vec![(1.0, 1.0), (1.0e6, 1.0e6)],
//! )?;
//!
//! // A short mold followed by one spray-cooled arc zone.
//! let mut zones = IndexMap::new();
//! zones.insert(
//!     "mold".to_string(),
//!     CoolingZone {
//!         kind: ZoneKind::Mold,
//!         start_m: 0.0,
//!         end_m: 0.8,
//!         floor_value: 5.0e4,
//!         imposed_flux: 1.2e6,
//!         heat_transfer_coeff: 0.0,
//!         water_value: 0.0,
//!     },
//! );
//! zones.insert(
//!     "spray".to_string(),
//!     CoolingZone {
//!         kind: ZoneKind::Secondary,
//!         start_m: 0.8,
//!         end_m: 6.0,
//!         floor_value: 5.0e4,
//!         imposed_flux: 0.0,
//!         heat_transfer_coeff: 900.0,
//!         water_value: 3.0e4,
//!     },
//! );
//! let machine = CastingMachine::new(zones, 0.1, 0.05, 6.0e5)?;
//!
//! let config = CasterConfig {
//!     rows: 4,
//!     cols: 4,
//!     window_capacity: 8,
//!     workers: 2,
//!     ..CasterConfig::default()
//! };
//! let mut sim = Simulation::new(config, table, machine)?;
//! for _ in 0..32 {
//!     sim.tick()?;
//! }
//! assert!(sim.sim_time_s() > 0.0);
//!
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.faces.len(), 6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | Material tables, machine description, identifiers |
//! | [`field`] | Slice grids, the sliding window, the double buffer |
//! | [`solver`] | Cell classification, stencil update, stable timestep |
//! | [`engine`] | Configuration, scheduler, tick loop, snapshots, runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core read-only collaborators: material tables and the machine.
pub use strand_core as types;

/// Field containers: slice grids, sliding window, double buffer.
pub use strand_field as field;

/// Explicit finite-difference stencil and timestep selection.
pub use strand_solver as solver;

/// Simulation engine: configuration, scheduling, snapshots, runner.
pub use strand_engine as engine;

/// Common imports for typical simulator usage.
pub mod prelude {
    // Casting configuration.
    pub use strand_core::{
        CastingMachine, CoolingZone, MachineSection, MaterialTable, StrandId, TickId, ZoneKind,
    };

    // Field state.
    pub use strand_field::{SliceGrid, SlidingFieldBuffer};

    // Engine surface.
    pub use strand_engine::{
        CastPhase, CasterConfig, EngineError, FaceId, PartitionStrategy, Simulation, StepError,
        StrandEvent, StrandRunner, SurfaceSnapshot, TickMetrics,
    };
}
