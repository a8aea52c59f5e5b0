//! Error types for the core collaborator interfaces.
//!
//! Organized by subsystem: material-property tables and the casting
//! machine description. Both are construction-time validation errors;
//! once a table or machine exists, lookups are infallible by contract.

use std::error::Error;
use std::fmt;

/// Errors detected while constructing a [`MaterialTable`](crate::MaterialTable).
///
/// The solver relies on strictly positive density and conductivity in
/// every bucket; that guarantee is established here, once, rather than
/// re-checked on the per-cell hot path.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialError {
    /// The property arrays are empty.
    EmptyTable,
    /// Property arrays have differing lengths.
    MismatchedLengths {
        /// Name of the offending property array.
        property: &'static str,
        /// Its length.
        got: usize,
        /// The expected length (from the density array).
        expected: usize,
    },
    /// A property value that must be strictly positive is not.
    NonPositiveProperty {
        /// Name of the offending property array.
        property: &'static str,
        /// Bucket index of the offending entry.
        bucket: usize,
        /// The offending value.
        value: f64,
    },
    /// The bucket width is zero, negative, or non-finite.
    InvalidBucketWidth {
        /// The offending width.
        value: f64,
    },
    /// The enthalpy↔temperature mapping has fewer than two breakpoints.
    MappingTooShort,
    /// The enthalpy↔temperature mapping is not strictly increasing.
    NonMonotonicMapping {
        /// Index of the first breakpoint that breaks monotonicity.
        index: usize,
    },
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable => write!(f, "material table has no buckets"),
            Self::MismatchedLengths {
                property,
                got,
                expected,
            } => write!(
                f,
                "property '{property}' has {got} buckets, expected {expected}"
            ),
            Self::NonPositiveProperty {
                property,
                bucket,
                value,
            } => write!(
                f,
                "property '{property}' bucket {bucket} is {value}, must be > 0"
            ),
            Self::InvalidBucketWidth { value } => {
                write!(f, "bucket width must be finite and positive, got {value}")
            }
            Self::MappingTooShort => {
                write!(f, "enthalpy-temperature mapping needs at least 2 breakpoints")
            }
            Self::NonMonotonicMapping { index } => {
                write!(f, "enthalpy-temperature mapping breaks monotonicity at {index}")
            }
        }
    }
}

impl Error for MaterialError {}

/// Errors detected while constructing a [`CastingMachine`](crate::CastingMachine).
#[derive(Clone, Debug, PartialEq)]
pub enum MachineError {
    /// No cooling zones were declared.
    NoZones,
    /// A zone's axial extent is empty or inverted.
    EmptyZone {
        /// Name of the offending zone.
        name: String,
    },
    /// Zones are not contiguous in ascending axial order.
    ZoneGap {
        /// Name of the zone whose start does not meet its predecessor's end.
        name: String,
    },
    /// The first declared zone is not a mold zone.
    FirstZoneNotMold,
    /// Casting speed is zero, negative, or non-finite.
    InvalidCastingSpeed {
        /// The offending value.
        value: f64,
    },
    /// Slice thickness is zero, negative, or non-finite.
    InvalidSliceThickness {
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoZones => write!(f, "machine has no cooling zones"),
            Self::EmptyZone { name } => write!(f, "zone '{name}' has an empty axial extent"),
            Self::ZoneGap { name } => {
                write!(f, "zone '{name}' does not start where its predecessor ends")
            }
            Self::FirstZoneNotMold => write!(f, "the first cooling zone must be the mold"),
            Self::InvalidCastingSpeed { value } => {
                write!(f, "casting speed must be finite and positive, got {value}")
            }
            Self::InvalidSliceThickness { value } => {
                write!(f, "slice thickness must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for MachineError {}
