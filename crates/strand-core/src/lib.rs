//! Core types and collaborator interfaces for the strand thermal simulator.
//!
//! This crate holds everything the simulation core consumes read-only
//! from the casting configuration: the bucketed [`MaterialTable`], the
//! [`CastingMachine`] zone description, strongly-typed identifiers, and
//! the construction-time error taxonomy. It has no knowledge of the
//! field containers or the solver.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod id;
mod machine;
mod material;

pub use error::{MachineError, MaterialError};
pub use id::{StrandId, TickId};
pub use machine::{CastingMachine, CoolingZone, MachineSection, ZoneKind};
pub use material::{BucketProps, MaterialTable};
