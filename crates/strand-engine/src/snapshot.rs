//! Surface snapshot extraction.
//!
//! A snapshot samples the six logical faces of the live strand at a
//! configurable stride and converts stored state values to temperature
//! via the material mapping. The quarter model stores only two of the
//! four lateral surfaces; the opposite pair is reconstructed by mirror
//! symmetry. Slice indices are segmented into mold / arc / exit ranges
//! from the machine's zone boundaries.

use std::ops::Range;

use indexmap::IndexMap;
use strand_core::{CastingMachine, MachineSection, MaterialTable, TickId};
use strand_field::SlidingFieldBuffer;

/// The six logical faces of the strand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceId {
    /// The newest cross-section (slice 0, at the meniscus end).
    TopCap,
    /// The oldest cross-section (the tail slice).
    BottomCap,
    /// Wide face stored in row 0 of the quarter grid.
    North,
    /// Wide face mirrored from row 0 by symmetry.
    South,
    /// Narrow face stored in column 0 of the quarter grid.
    East,
    /// Narrow face mirrored from column 0 by symmetry.
    West,
}

/// Sampled temperatures of one face, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceSample {
    /// Sampled rows.
    pub rows: usize,
    /// Sampled columns.
    pub cols: usize,
    /// `rows × cols` temperatures.
    pub temperatures: Vec<f64>,
}

impl FaceSample {
    fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            temperatures: Vec::new(),
        }
    }

    /// Temperature at sampled position `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        assert!(r < self.rows && c < self.cols, "sample ({r}, {c}) out of range");
        self.temperatures[r * self.cols + c]
    }
}

/// Slice-index ranges of the machine sections, all half-open.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionRanges {
    /// Slices still in the mold.
    pub mold: Range<usize>,
    /// Slices in the secondary-cooling arc.
    pub arc: Range<usize>,
    /// Slices past the last declared zone.
    pub exit: Range<usize>,
}

/// One extracted surface snapshot.
#[derive(Clone, Debug)]
pub struct SurfaceSnapshot {
    /// Tick the snapshot was taken at.
    pub tick: TickId,
    /// Simulated seconds elapsed when taken.
    pub sim_time_s: f64,
    /// Sampling stride used.
    pub stride: usize,
    /// The six faces, in declaration order.
    pub faces: IndexMap<FaceId, FaceSample>,
    /// Machine-section segmentation of the slice indices.
    pub sections: SectionRanges,
}

impl SurfaceSnapshot {
    /// Sample the field's surfaces.
    pub fn extract(
        field: &SlidingFieldBuffer,
        table: &MaterialTable,
        machine: &CastingMachine,
        head_offset_m: f64,
        tick: TickId,
        sim_time_s: f64,
        stride: usize,
    ) -> Self {
        let size = field.size();
        let mut faces = IndexMap::new();
        if size == 0 {
            for id in [
                FaceId::TopCap,
                FaceId::BottomCap,
                FaceId::North,
                FaceId::South,
                FaceId::East,
                FaceId::West,
            ] {
                faces.insert(id, FaceSample::empty());
            }
            return Self {
                tick,
                sim_time_s,
                stride,
                faces,
                sections: SectionRanges {
                    mold: 0..0,
                    arc: 0..0,
                    exit: 0..0,
                },
            };
        }

        faces.insert(FaceId::TopCap, cap_face(field, table, 0, stride));
        faces.insert(FaceId::BottomCap, cap_face(field, table, size - 1, stride));

        let north = lateral_face(field, table, stride, |z, i| field.get(z, 0, i), field.cols());
        faces.insert(FaceId::North, north.clone());
        faces.insert(FaceId::South, north);

        let east = lateral_face(field, table, stride, |z, i| field.get(z, i, 0), field.rows());
        faces.insert(FaceId::East, east.clone());
        faces.insert(FaceId::West, east);

        Self {
            tick,
            sim_time_s,
            stride,
            faces,
            sections: section_ranges(machine, head_offset_m, size),
        }
    }
}

fn sampled(n: usize, stride: usize) -> impl Iterator<Item = usize> {
    (0..n).step_by(stride)
}

fn cap_face(
    field: &SlidingFieldBuffer,
    table: &MaterialTable,
    z: usize,
    stride: usize,
) -> FaceSample {
    let grid = field.slice(z);
    let mut temperatures = Vec::new();
    let mut rows = 0;
    for y in sampled(grid.rows(), stride) {
        rows += 1;
        for x in sampled(grid.cols(), stride) {
            temperatures.push(table.enthalpy_to_temperature(grid.get(y, x)));
        }
    }
    let cols = temperatures.len() / rows.max(1);
    FaceSample {
        rows,
        cols,
        temperatures,
    }
}

fn lateral_face(
    field: &SlidingFieldBuffer,
    table: &MaterialTable,
    stride: usize,
    surface: impl Fn(usize, usize) -> f64,
    width: usize,
) -> FaceSample {
    let mut temperatures = Vec::new();
    let mut rows = 0;
    for z in sampled(field.size(), stride) {
        rows += 1;
        for i in sampled(width, stride) {
            temperatures.push(table.enthalpy_to_temperature(surface(z, i)));
        }
    }
    let cols = temperatures.len() / rows.max(1);
    FaceSample {
        rows,
        cols,
        temperatures,
    }
}

/// Contiguous mold/arc/exit index ranges. Because `z` increases with
/// axial position the three sections partition `0..size` in order.
fn section_ranges(machine: &CastingMachine, head_offset_m: f64, size: usize) -> SectionRanges {
    let mut mold_end = size;
    let mut arc_end = size;
    for z in 0..size {
        match machine.section_of(head_offset_m + machine.slice_center(z)) {
            MachineSection::Mold => {}
            MachineSection::Arc => {
                if mold_end == size {
                    mold_end = z;
                }
            }
            MachineSection::Exit => {
                if mold_end == size {
                    mold_end = z;
                }
                if arc_end == size {
                    arc_end = z;
                }
            }
        }
    }
    SectionRanges {
        mold: 0..mold_end,
        arc: mold_end..arc_end,
        exit: arc_end..size,
    }
}

/// Accumulated simulated-time trigger for snapshot events.
///
/// Carries the remainder past each firing so the cadence does not
/// drift with tick-size jitter.
#[derive(Clone, Debug)]
pub struct SnapshotCadence {
    period_s: f64,
    accrued_s: f64,
}

impl SnapshotCadence {
    /// A cadence firing every `period_s` simulated seconds.
    pub fn new(period_s: f64) -> Self {
        Self {
            period_s,
            accrued_s: 0.0,
        }
    }

    /// Account `dt` simulated seconds; true when a snapshot is due.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.accrued_s += dt;
        if self.accrued_s >= self.period_s {
            self.accrued_s -= self.period_s;
            true
        } else {
            false
        }
    }
}
