use crate::math::StatsHelper;
use crate::model::Spectrum;
use crate::prelude::{CcfError, CcfResult, CoverageBound, SPEED_OF_LIGHT_KMS};
use ndarray::{Array1, ArrayView1};
use std::fmt;
use std::str::FromStr;

/// How a radial velocity moves template wavelengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftMode {
    /// Additive offset `mean(observation wavelength) * rv / c`.
    Linear,
    /// Multiplicative factor `1 + rv / c`.
    #[default]
    Doppler,
}

impl FromStr for ShiftMode {
    type Err = CcfError;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "linear" => Ok(ShiftMode::Linear),
            "doppler" => Ok(ShiftMode::Doppler),
            other => Err(CcfError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for ShiftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftMode::Linear => write!(f, "linear"),
            ShiftMode::Doppler => write!(f, "doppler"),
        }
    }
}

/// Shift model bound to a prepared observation.
#[derive(Debug, Clone, Copy)]
pub struct ShiftModel {
    mode: ShiftMode,
    mean_wavelength: f64,
}

impl ShiftModel {
    pub fn new(mode: ShiftMode, observation: &Spectrum) -> Self {
        Self {
            mode,
            mean_wavelength: StatsHelper::mean(observation.wavelength()),
        }
    }

    pub fn mode(&self) -> ShiftMode {
        self.mode
    }

    pub fn shift(&self, wavelength: f64, rv: f64) -> f64 {
        match self.mode {
            ShiftMode::Linear => wavelength + self.mean_wavelength * (rv / SPEED_OF_LIGHT_KMS),
            ShiftMode::Doppler => wavelength * (1.0 + rv / SPEED_OF_LIGHT_KMS),
        }
    }

    pub fn shift_all(&self, wavelength: ArrayView1<f64>, rv: f64) -> Array1<f64> {
        wavelength.mapv(|w| self.shift(w, rv))
    }

    /// Checks that the template, shifted anywhere in `[rvmin, rvmax]`, still
    /// brackets the observation so interpolation never extrapolates.
    pub fn validate_coverage(
        &self,
        template: &Spectrum,
        observation: &Spectrum,
        rvmin: f64,
        rvmax: f64,
    ) -> CcfResult<()> {
        let lowest = self.shift(template.first_wavelength(), rvmax);
        if lowest > observation.first_wavelength() {
            return Err(CcfError::InsufficientCoverage {
                bound: CoverageBound::Lower,
                reached: lowest,
                required: observation.first_wavelength(),
            });
        }

        let highest = self.shift(template.last_wavelength(), rvmin);
        if highest < observation.last_wavelength() {
            return Err(CcfError::InsufficientCoverage {
                bound: CoverageBound::Upper,
                reached: highest,
                required: observation.last_wavelength(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid(start: f64, end: f64, len: usize) -> Spectrum {
        let step = (end - start) / (len - 1) as f64;
        let wavelength = (0..len).map(|i| start + step * i as f64).collect();
        Spectrum::new(wavelength, vec![1.0; len]).unwrap()
    }

    #[test]
    fn mode_parses_known_names_only() {
        assert_eq!("linear".parse::<ShiftMode>().unwrap(), ShiftMode::Linear);
        assert_eq!("doppler".parse::<ShiftMode>().unwrap(), ShiftMode::Doppler);
        assert_eq!(
            "quadratic".parse::<ShiftMode>().unwrap_err(),
            CcfError::UnsupportedMode("quadratic".into())
        );
    }

    #[test]
    fn doppler_shift_scales_wavelength() {
        let model = ShiftModel::new(ShiftMode::Doppler, &grid(500.0, 510.0, 11));
        assert_relative_eq!(
            model.shift(500.0, SPEED_OF_LIGHT_KMS / 100.0),
            505.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn linear_shift_uses_mean_observed_wavelength() {
        let model = ShiftModel::new(ShiftMode::Linear, &grid(500.0, 510.0, 11));
        let shifted = model.shift_all(
            ndarray::array![400.0, 600.0].view(),
            SPEED_OF_LIGHT_KMS / 100.0,
        );
        assert_relative_eq!(shifted[0], 405.05, max_relative = 1e-12);
        assert_relative_eq!(shifted[1], 605.05, max_relative = 1e-12);
    }

    #[test]
    fn identical_spans_fail_the_lower_bound_for_positive_rvmax() {
        let spectrum = grid(500.0, 510.0, 101);
        let model = ShiftModel::new(ShiftMode::Doppler, &spectrum);
        let err = model
            .validate_coverage(&spectrum, &spectrum, -1000.0, 1000.0)
            .unwrap_err();
        assert!(matches!(
            err,
            CcfError::InsufficientCoverage {
                bound: CoverageBound::Lower,
                ..
            }
        ));
    }

    #[test]
    fn narrow_template_fails_the_upper_bound() {
        let observation = grid(500.0, 510.0, 101);
        let template = grid(490.0, 509.0, 191);
        let model = ShiftModel::new(ShiftMode::Linear, &observation);
        let err = model
            .validate_coverage(&template, &observation, -100.0, 100.0)
            .unwrap_err();
        assert!(matches!(
            err,
            CcfError::InsufficientCoverage {
                bound: CoverageBound::Upper,
                ..
            }
        ));
    }

    #[test]
    fn wide_template_covers_the_range_in_both_modes() {
        let observation = grid(500.0, 510.0, 101);
        let template = grid(495.0, 515.0, 401);
        for mode in [ShiftMode::Linear, ShiftMode::Doppler] {
            let model = ShiftModel::new(mode, &observation);
            assert!(model
                .validate_coverage(&template, &observation, -200.0, 200.0)
                .is_ok());
        }
    }
}
