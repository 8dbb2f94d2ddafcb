use crate::prelude::{CcfError, CcfResult};

/// Largest number of shifts a single grid may hold.
pub const MAX_SHIFTS: usize = 10_000_000;

/// Radial-velocity grid `rvmin + k * drv` over the half-open range
/// `[rvmin, rvmax)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftGrid {
    values: Vec<f64>,
}

impl ShiftGrid {
    /// Checks the range ordering and the step without building the grid.
    pub fn validate(rvmin: f64, rvmax: f64, drv: f64) -> CcfResult<()> {
        if !(rvmin.is_finite() && rvmax.is_finite() && rvmax > rvmin) {
            return Err(CcfError::InvalidRange { rvmin, rvmax });
        }
        if !(drv.is_finite() && drv > 0.0) {
            return Err(CcfError::InvalidStep { drv });
        }
        Ok(())
    }

    pub fn generate(rvmin: f64, rvmax: f64, drv: f64) -> CcfResult<Self> {
        Self::validate(rvmin, rvmax, drv)?;
        let estimate = ((rvmax - rvmin) / drv).ceil();
        // Also catches an infinite span from overflowing finite bounds.
        if !(estimate <= MAX_SHIFTS as f64) {
            return Err(CcfError::GridTooLarge {
                estimate,
                max: MAX_SHIFTS,
            });
        }
        let count = estimate as usize;

        let mut values = Vec::with_capacity(count);
        for k in 0..=count {
            let rv = rvmin + k as f64 * drv;
            if rv >= rvmax {
                break;
            }
            values.push(rv);
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ErrorKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn grid_is_half_open() {
        let grid = ShiftGrid::generate(-2.0, 2.0, 1.0).unwrap();
        assert_eq!(grid.values(), &[-2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn grid_includes_partial_last_step() {
        let grid = ShiftGrid::generate(0.0, 2.5, 1.0).unwrap();
        assert_eq!(grid.values(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn grid_values_do_not_accumulate_rounding() {
        let grid = ShiftGrid::generate(-30.0, 30.0, 0.1).unwrap();
        assert_eq!(grid.len(), 600);
        for (k, rv) in grid.values().iter().enumerate() {
            assert_abs_diff_eq!(*rv, -30.0 + 0.1 * k as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverted_or_empty_range_is_rejected() {
        assert_eq!(
            ShiftGrid::generate(50.0, 10.0, 1.0).unwrap_err(),
            CcfError::InvalidRange {
                rvmin: 50.0,
                rvmax: 10.0
            }
        );
        assert!(ShiftGrid::generate(10.0, 10.0, 1.0).is_err());
        assert!(ShiftGrid::generate(f64::NAN, 10.0, 1.0).is_err());
    }

    #[test]
    fn infinite_bounds_are_rejected() {
        assert_eq!(
            ShiftGrid::validate(0.0, f64::INFINITY, 1.0).unwrap_err(),
            CcfError::InvalidRange {
                rvmin: 0.0,
                rvmax: f64::INFINITY
            }
        );
        assert_eq!(
            ShiftGrid::generate(f64::NEG_INFINITY, 0.0, 1.0).unwrap_err(),
            CcfError::InvalidRange {
                rvmin: f64::NEG_INFINITY,
                rvmax: 0.0
            }
        );
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocation() {
        let err = ShiftGrid::generate(0.0, 1.0e6, 1.0e-14).unwrap_err();
        assert!(matches!(
            err,
            CcfError::GridTooLarge {
                max: MAX_SHIFTS,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(ShiftGrid::generate(-f64::MAX, f64::MAX, 1.0).is_err());
    }

    #[test]
    fn non_positive_step_is_rejected() {
        assert_eq!(
            ShiftGrid::generate(0.0, 10.0, 0.0).unwrap_err(),
            CcfError::InvalidStep { drv: 0.0 }
        );
        assert!(ShiftGrid::generate(0.0, 10.0, -1.0).is_err());
        assert!(ShiftGrid::generate(0.0, 10.0, f64::INFINITY).is_err());
    }
}
