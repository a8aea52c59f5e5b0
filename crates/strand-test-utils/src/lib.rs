//! Shared fixtures for the strand simulator test suites.
//!
//! Deliberately simple physics: the material table is flat (identical
//! properties in every bucket, identity enthalpy↔temperature mapping)
//! so expected values in tests are easy to derive by hand, and the
//! machine has one short mold followed by one long spray zone.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use indexmap::IndexMap;
use strand_core::{CastingMachine, CoolingZone, MaterialTable, ZoneKind};
use strand_field::SlidingFieldBuffer;

/// A flat 20-bucket table covering state values 0..1e6.
///
/// Density 7500, enthalpy 2.0e5, conductivity 30, specific heat 650 in
/// every bucket; the enthalpy↔temperature mapping is the identity. The
/// enthalpy sits well below the pour value so the adaptive timestep
/// leaves a decay margin and fields evolve smoothly in tests.
pub fn constant_table() -> MaterialTable {
    MaterialTable::new(
        0.0,
        5.0e4,
        vec![7500.0; 20],
        vec![2.0e5; 20],
        vec![30.0; 20],
        vec![650.0; 20],
        vec![(1.0, 1.0), (1.0e6, 1.0e6)],
    )
    .expect("fixture table is valid")
}

/// A mold from 0 to 0.8 m, then one spray zone to 6 m.
///
/// Casting speed 0.1 m/s, slice thickness 0.05 m, pour value 6.0e5.
pub fn two_zone_machine() -> CastingMachine {
    let mut zones = IndexMap::new();
    zones.insert(
        "mold".to_string(),
        CoolingZone {
            kind: ZoneKind::Mold,
            start_m: 0.0,
            end_m: 0.8,
            floor_value: 5.0e4,
            imposed_flux: 1.2e6,
            heat_transfer_coeff: 0.0,
            water_value: 0.0,
        },
    );
    zones.insert(
        "spray".to_string(),
        CoolingZone {
            kind: ZoneKind::Secondary,
            start_m: 0.8,
            end_m: 6.0,
            floor_value: 5.0e4,
            imposed_flux: 0.0,
            heat_transfer_coeff: 900.0,
            water_value: 3.0e4,
        },
    );
    CastingMachine::new(zones, 0.1, 0.05, 6.0e5).expect("fixture machine is valid")
}

/// A window with `count` live slices, every cell set to `value`.
pub fn uniform_window(
    rows: usize,
    cols: usize,
    capacity: usize,
    count: usize,
    value: f64,
) -> SlidingFieldBuffer {
    let mut window = SlidingFieldBuffer::new(rows, cols, capacity);
    for _ in 0..count {
        window.add_first(value);
    }
    window
}
