//! Effective conductivity between neighbouring cells.
//!
//! Heat crossing a cell interface sees half of each cell in series, so
//! the interface conductivity is the distance-weighted harmonic mean of
//! the two cell conductivities, scaled by a plant calibration factor.

/// Plant calibration factor applied to every interface conductivity.
pub const CALIBRATION: f64 = 0.9;

/// Calibrated series (harmonic) interface conductivity.
///
/// `half_self` / `half_nb` are the half-cell distances on each side of
/// the interface; `k_self` / `k_nb` the cell conductivities. With equal
/// halves this reduces to the plain harmonic mean times [`CALIBRATION`].
#[inline]
pub fn effective_conductivity(half_self: f64, half_nb: f64, k_self: f64, k_nb: f64) -> f64 {
    CALIBRATION * (half_self + half_nb) / (half_self / k_self + half_nb / k_nb)
}
