//! Casting-machine description: cooling zones and boundary conditions.
//!
//! The machine is the second collaborator the simulation core consumes.
//! It maps an axial position along the strand to a [`CoolingZone`], and
//! each zone's [`ZoneKind`] selects the boundary-condition formula by an
//! exhaustive match: the mold imposes a heat flux, the secondary-cooling
//! arc imposes a heat-transfer coefficient against spray water.

use indexmap::IndexMap;

use crate::error::MachineError;

/// The two cooling regimes with distinct boundary-condition formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    /// Mold contact: an imposed outward heat flux.
    Mold,
    /// Secondary cooling: convective exchange `h · (T_surface − T_water)`.
    Secondary,
}

/// Machine sections used for snapshot segmentation.
///
/// Derived from axial position: the mold zones, the secondary-cooling
/// arc, and the exit region beyond the last declared zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MachineSection {
    /// Inside a mold zone.
    Mold,
    /// Inside the secondary-cooling arc.
    Arc,
    /// Past the last declared cooling zone.
    Exit,
}

/// One axial cooling zone.
#[derive(Clone, Debug, PartialEq)]
pub struct CoolingZone {
    /// Boundary-condition regime.
    pub kind: ZoneKind,
    /// Axial start, metres from the meniscus. Inclusive.
    pub start_m: f64,
    /// Axial end, metres from the meniscus. Exclusive.
    pub end_m: f64,
    /// Floor temperature-equivalent value cells in this zone clamp to.
    pub floor_value: f64,
    /// Imposed outward heat flux, W/m². Read when `kind == Mold`.
    pub imposed_flux: f64,
    /// Heat-transfer coefficient, W/(m²·K). Read when `kind == Secondary`.
    pub heat_transfer_coeff: f64,
    /// Spray-water temperature-equivalent value. Read when `kind == Secondary`.
    pub water_value: f64,
}

/// Immutable description of one casting machine configuration.
///
/// Zones are kept in declaration order; [`CastingMachine::new`] verifies
/// they tile the axis contiguously from zero, so `zone_of` resolves by a
/// single forward scan in that order.
#[derive(Clone, Debug)]
pub struct CastingMachine {
    zones: IndexMap<String, CoolingZone>,
    /// Strand travel speed, m/s.
    pub casting_speed: f64,
    /// Axial thickness of one slice, m.
    pub slice_thickness: f64,
    /// State value assigned to every cell of a freshly poured slice.
    pub pour_value: f64,
}

impl CastingMachine {
    /// Construct and validate a machine description.
    ///
    /// Zones must be non-empty, contiguous, in ascending axial order,
    /// starting at 0 with a mold zone.
    pub fn new(
        zones: IndexMap<String, CoolingZone>,
        casting_speed: f64,
        slice_thickness: f64,
        pour_value: f64,
    ) -> Result<Self, MachineError> {
        if zones.is_empty() {
            return Err(MachineError::NoZones);
        }
        if !(casting_speed.is_finite() && casting_speed > 0.0) {
            return Err(MachineError::InvalidCastingSpeed {
                value: casting_speed,
            });
        }
        if !(slice_thickness.is_finite() && slice_thickness > 0.0) {
            return Err(MachineError::InvalidSliceThickness {
                value: slice_thickness,
            });
        }
        let mut cursor = 0.0;
        for (i, (name, zone)) in zones.iter().enumerate() {
            if zone.end_m <= zone.start_m {
                return Err(MachineError::EmptyZone { name: name.clone() });
            }
            if (zone.start_m - cursor).abs() > 1e-9 {
                return Err(MachineError::ZoneGap { name: name.clone() });
            }
            if i == 0 && zone.kind != ZoneKind::Mold {
                return Err(MachineError::FirstZoneNotMold);
            }
            cursor = zone.end_m;
        }
        Ok(Self {
            zones,
            casting_speed,
            slice_thickness,
            pour_value,
        })
    }

    /// Named zones in axial order.
    pub fn zones(&self) -> &IndexMap<String, CoolingZone> {
        &self.zones
    }

    /// Total axial extent covered by declared zones, metres.
    pub fn machine_length(&self) -> f64 {
        self.zones
            .values()
            .last()
            .map(|z| z.end_m)
            .unwrap_or(0.0)
    }

    /// The cooling zone governing an axial position.
    ///
    /// Positions beyond the last declared zone keep the last zone's
    /// boundary conditions (the strand is still tracked past the arc).
    pub fn zone_of(&self, axial_m: f64) -> &CoolingZone {
        for zone in self.zones.values() {
            if axial_m < zone.end_m {
                return zone;
            }
        }
        self.zones
            .values()
            .last()
            .expect("validated: at least one zone")
    }

    /// Axial position of a slice centre, metres from the meniscus.
    pub fn slice_center(&self, z: usize) -> f64 {
        (z as f64 + 0.5) * self.slice_thickness
    }

    /// The cooling zone governing logical slice index `z`.
    pub fn zone_at_slice(&self, z: usize) -> &CoolingZone {
        self.zone_of(self.slice_center(z))
    }

    /// Which machine section an axial position falls in.
    pub fn section_of(&self, axial_m: f64) -> MachineSection {
        if axial_m >= self.machine_length() {
            return MachineSection::Exit;
        }
        match self.zone_of(axial_m).kind {
            ZoneKind::Mold => MachineSection::Mold,
            ZoneKind::Secondary => MachineSection::Arc,
        }
    }

    /// Outward boundary heat flux for a surface cell, W/m².
    ///
    /// The zone kind selects the formula: mold zones impose a fixed
    /// flux; secondary zones exchange convectively against spray water
    /// at the given surface state value.
    pub fn boundary_flux(&self, zone: &CoolingZone, surface_value: f64) -> f64 {
        match zone.kind {
            ZoneKind::Mold => zone.imposed_flux,
            ZoneKind::Secondary => {
                zone.heat_transfer_coeff * (surface_value - zone.water_value)
            }
        }
    }

    /// Boundary heat-transfer coefficient for a surface cell, W/(m²·K).
    ///
    /// Zero in the mold (the imposed flux does not scale with surface
    /// state, so it contributes no stability constraint).
    pub fn boundary_coefficient(&self, zone: &CoolingZone) -> f64 {
        match zone.kind {
            ZoneKind::Mold => 0.0,
            ZoneKind::Secondary => zone.heat_transfer_coeff,
        }
    }
}
