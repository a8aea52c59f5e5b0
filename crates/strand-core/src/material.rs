//! Temperature-bucketed material property tables.
//!
//! [`MaterialTable`] is the narrow interface the solver consumes from the
//! steel/grade configuration: per-bucket arrays of density, specific
//! enthalpy, conductivity, and specific heat, indexed by discretizing a
//! cell's stored state value, plus the monotonic piecewise-linear
//! enthalpy↔temperature mappings used at snapshot extraction.
//!
//! All positivity and monotonicity guarantees are established by
//! [`MaterialTable::new`]; lookup methods are infallible and clamp
//! out-of-range values to the nearest bucket, so a cell that overshoots
//! the tabulated range reads the edge properties instead of faulting.

use crate::error::MaterialError;

/// Per-bucket properties of one cell, fetched in a single lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketProps {
    /// Density, kg/m³. Strictly positive.
    pub density: f64,
    /// Specific enthalpy, J/kg. Strictly positive.
    pub enthalpy: f64,
    /// Thermal conductivity, W/(m·K). Strictly positive.
    pub conductivity: f64,
    /// Specific heat, J/(kg·K). Strictly positive.
    pub specific_heat: f64,
}

/// Read-only material property table for one steel grade.
///
/// Owned by the casting configuration collaborator; the simulation core
/// holds only a shared reference. Buckets discretize the stored
/// temperature-equivalent state value: bucket `i` covers
/// `[min_value + i·bucket_width, min_value + (i+1)·bucket_width)`.
#[derive(Clone, Debug)]
pub struct MaterialTable {
    min_value: f64,
    bucket_width: f64,
    density: Vec<f64>,
    enthalpy: Vec<f64>,
    conductivity: Vec<f64>,
    specific_heat: Vec<f64>,
    /// `(enthalpy, temperature)` breakpoints, strictly increasing in both.
    mapping: Vec<(f64, f64)>,
}

impl MaterialTable {
    /// Construct and validate a material table.
    ///
    /// All four property arrays must be the same non-zero length with
    /// strictly positive entries, `bucket_width` must be finite and
    /// positive, and `mapping` must contain at least two breakpoints
    /// strictly increasing in both coordinates.
    pub fn new(
        min_value: f64,
        bucket_width: f64,
        density: Vec<f64>,
        enthalpy: Vec<f64>,
        conductivity: Vec<f64>,
        specific_heat: Vec<f64>,
        mapping: Vec<(f64, f64)>,
    ) -> Result<Self, MaterialError> {
        if density.is_empty() {
            return Err(MaterialError::EmptyTable);
        }
        if !(bucket_width.is_finite() && bucket_width > 0.0) {
            return Err(MaterialError::InvalidBucketWidth {
                value: bucket_width,
            });
        }
        let expected = density.len();
        for (property, arr) in [
            ("enthalpy", &enthalpy),
            ("conductivity", &conductivity),
            ("specific_heat", &specific_heat),
        ] {
            if arr.len() != expected {
                return Err(MaterialError::MismatchedLengths {
                    property,
                    got: arr.len(),
                    expected,
                });
            }
        }
        for (property, arr) in [
            ("density", &density),
            ("enthalpy", &enthalpy),
            ("conductivity", &conductivity),
            ("specific_heat", &specific_heat),
        ] {
            for (bucket, &value) in arr.iter().enumerate() {
                if !(value.is_finite() && value > 0.0) {
                    return Err(MaterialError::NonPositiveProperty {
                        property,
                        bucket,
                        value,
                    });
                }
            }
        }
        if mapping.len() < 2 {
            return Err(MaterialError::MappingTooShort);
        }
        for i in 1..mapping.len() {
            let (h0, t0) = mapping[i - 1];
            let (h1, t1) = mapping[i];
            if h1 <= h0 || t1 <= t0 {
                return Err(MaterialError::NonMonotonicMapping { index: i });
            }
        }
        Ok(Self {
            min_value,
            bucket_width,
            density,
            enthalpy,
            conductivity,
            specific_heat,
            mapping,
        })
    }

    /// Number of discretization buckets.
    pub fn bucket_count(&self) -> usize {
        self.density.len()
    }

    /// Discretize a stored state value into a bucket index.
    ///
    /// Values outside the tabulated range clamp to the first or last
    /// bucket. NaN clamps to the first bucket.
    pub fn bucket_of(&self, value: f64) -> usize {
        let raw = (value - self.min_value) / self.bucket_width;
        if raw.is_nan() || raw <= 0.0 {
            return 0;
        }
        (raw as usize).min(self.density.len() - 1)
    }

    /// Density at a state value, kg/m³.
    pub fn density_at(&self, value: f64) -> f64 {
        self.density[self.bucket_of(value)]
    }

    /// Specific enthalpy at a state value, J/kg.
    pub fn enthalpy_at(&self, value: f64) -> f64 {
        self.enthalpy[self.bucket_of(value)]
    }

    /// Thermal conductivity at a state value, W/(m·K).
    pub fn conductivity_at(&self, value: f64) -> f64 {
        self.conductivity[self.bucket_of(value)]
    }

    /// Specific heat at a state value, J/(kg·K).
    pub fn specific_heat_at(&self, value: f64) -> f64 {
        self.specific_heat[self.bucket_of(value)]
    }

    /// All four properties at a state value in one bucket lookup.
    pub fn props_at(&self, value: f64) -> BucketProps {
        let b = self.bucket_of(value);
        BucketProps {
            density: self.density[b],
            enthalpy: self.enthalpy[b],
            conductivity: self.conductivity[b],
            specific_heat: self.specific_heat[b],
        }
    }

    /// Convert specific enthalpy to temperature via the piecewise-linear
    /// mapping. Clamps to the end segments outside the tabulated range.
    pub fn enthalpy_to_temperature(&self, h: f64) -> f64 {
        Self::interpolate(self.mapping.iter().map(|&(a, b)| (a, b)), h)
    }

    /// Convert temperature to specific enthalpy, the inverse mapping.
    pub fn temperature_to_enthalpy(&self, t: f64) -> f64 {
        Self::interpolate(self.mapping.iter().map(|&(a, b)| (b, a)), t)
    }

    fn interpolate(pairs: impl Iterator<Item = (f64, f64)>, x: f64) -> f64 {
        let mut prev: Option<(f64, f64)> = None;
        for (px, py) in pairs {
            if x <= px {
                return match prev {
                    // Left of the first breakpoint: clamp.
                    None => py,
                    Some((qx, qy)) => qy + (py - qy) * (x - qx) / (px - qx),
                };
            }
            prev = Some((px, py));
        }
        // Right of the last breakpoint: clamp.
        prev.map(|(_, qy)| qy).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> MaterialTable {
        MaterialTable::new(
            0.0,
            100.0,
            vec![7800.0, 7600.0, 7400.0],
            vec![4.0e5, 6.0e5, 8.0e5],
            vec![30.0, 28.0, 26.0],
            vec![600.0, 650.0, 700.0],
            vec![(4.0e5, 800.0), (6.0e5, 1200.0), (8.0e5, 1500.0)],
        )
        .unwrap()
    }

    #[test]
    fn bucket_discretization_clamps() {
        let t = table();
        assert_eq!(t.bucket_of(-50.0), 0);
        assert_eq!(t.bucket_of(0.0), 0);
        assert_eq!(t.bucket_of(150.0), 1);
        assert_eq!(t.bucket_of(250.0), 2);
        assert_eq!(t.bucket_of(9999.0), 2);
        assert_eq!(t.bucket_of(f64::NAN), 0);
    }

    #[test]
    fn property_lookup_follows_bucket() {
        let t = table();
        assert_eq!(t.density_at(150.0), 7600.0);
        assert_eq!(t.conductivity_at(150.0), 28.0);
        let p = t.props_at(250.0);
        assert_eq!(p.density, 7400.0);
        assert_eq!(p.enthalpy, 8.0e5);
    }

    #[test]
    fn mapping_interpolates_and_clamps() {
        let t = table();
        assert_eq!(t.enthalpy_to_temperature(4.0e5), 800.0);
        assert_eq!(t.enthalpy_to_temperature(5.0e5), 1000.0);
        assert_eq!(t.enthalpy_to_temperature(8.0e5), 1500.0);
        // Outside the range: clamp to the end values.
        assert_eq!(t.enthalpy_to_temperature(1.0e5), 800.0);
        assert_eq!(t.enthalpy_to_temperature(9.0e5), 1500.0);
    }

    #[test]
    fn mapping_round_trips_within_range() {
        let t = table();
        for h in [4.0e5, 4.7e5, 6.0e5, 7.3e5, 8.0e5] {
            let back = t.temperature_to_enthalpy(t.enthalpy_to_temperature(h));
            assert!((back - h).abs() < 1e-6, "round trip failed for {h}: {back}");
        }
    }

    #[test]
    fn rejects_non_positive_conductivity() {
        let err = MaterialTable::new(
            0.0,
            100.0,
            vec![7800.0],
            vec![4.0e5],
            vec![0.0],
            vec![600.0],
            vec![(4.0e5, 800.0), (8.0e5, 1500.0)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MaterialError::NonPositiveProperty {
                property: "conductivity",
                ..
            }
        ));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = MaterialTable::new(
            0.0,
            100.0,
            vec![7800.0, 7600.0],
            vec![4.0e5],
            vec![30.0, 28.0],
            vec![600.0, 650.0],
            vec![(4.0e5, 800.0), (8.0e5, 1500.0)],
        )
        .unwrap_err();
        assert!(matches!(err, MaterialError::MismatchedLengths { .. }));
    }

    #[test]
    fn rejects_non_monotonic_mapping() {
        let err = MaterialTable::new(
            0.0,
            100.0,
            vec![7800.0],
            vec![4.0e5],
            vec![30.0],
            vec![600.0],
            vec![(4.0e5, 800.0), (6.0e5, 700.0)],
        )
        .unwrap_err();
        assert_eq!(err, MaterialError::NonMonotonicMapping { index: 1 });
    }

    proptest! {
        /// Discretization never escapes the table, whatever the input.
        #[test]
        fn bucket_of_never_leaves_the_table(value in -1.0e7f64..1.0e7) {
            let t = table();
            prop_assert!(t.bucket_of(value) < t.bucket_count());
        }

        /// The two mapping directions invert each other inside the
        /// tabulated range.
        #[test]
        fn mapping_round_trips_anywhere_in_range(h in 4.0e5f64..8.0e5) {
            let t = table();
            let back = t.temperature_to_enthalpy(t.enthalpy_to_temperature(h));
            prop_assert!((back - h).abs() < 1e-6, "round trip for {}: {}", h, back);
        }

        /// Interpolation is monotonic and clamped to the end values.
        #[test]
        fn mapping_is_monotonic_and_bounded(a in 0.0f64..1.0e6, b in 0.0f64..1.0e6) {
            let t = table();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let t_lo = t.enthalpy_to_temperature(lo);
            let t_hi = t.enthalpy_to_temperature(hi);
            prop_assert!(t_lo <= t_hi);
            prop_assert!((800.0..=1500.0).contains(&t_lo));
            prop_assert!((800.0..=1500.0).contains(&t_hi));
        }
    }
}
