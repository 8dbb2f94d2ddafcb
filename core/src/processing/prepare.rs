use crate::model::Spectrum;
use crate::prelude::{CcfError, CcfResult, CoverageBound, TaperFault};
use ndarray::Zip;
use std::f64::consts::FRAC_PI_2;

/// Sine-ramp tapering widths for the two spectrum edges, in wavelength units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeTaper {
    left: f64,
    right: f64,
}

impl EdgeTaper {
    pub fn new(left: f64, right: f64) -> CcfResult<Self> {
        Self::check_width(CoverageBound::Lower, left)?;
        Self::check_width(CoverageBound::Upper, right)?;
        Ok(Self { left, right })
    }

    pub fn uniform(width: f64) -> CcfResult<Self> {
        Self::new(width, width)
    }

    /// Interprets zero widths as "no tapering", one as both edges and two as
    /// `(left, right)`.
    pub fn from_widths(widths: &[f64]) -> CcfResult<Option<Self>> {
        match widths {
            [] => Ok(None),
            [width] => Self::uniform(*width).map(Some),
            [left, right] => Self::new(*left, *right).map(Some),
            _ => Err(CcfError::InvalidTaper(TaperFault::Malformed {
                count: widths.len(),
            })),
        }
    }

    fn check_width(edge: CoverageBound, width: f64) -> CcfResult<()> {
        if width.is_finite() && width >= 0.0 {
            Ok(())
        } else {
            Err(CcfError::InvalidTaper(TaperFault::Negative { edge, width }))
        }
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    /// Multiplies flux inside each taper window by a quarter-sine ramp that
    /// is 0 at the boundary and 1 at the inner edge of the window.
    pub fn apply(&self, spectrum: &mut Spectrum) {
        let first = spectrum.first_wavelength();
        let last = spectrum.last_wavelength();
        let (wavelength, flux) = spectrum.split_mut();

        if self.left > 0.0 {
            let width = self.left;
            Zip::from(&mut *flux).and(&wavelength).for_each(|f, &w| {
                if w < first + width {
                    *f *= ((w - first) / width * FRAC_PI_2).sin();
                }
            });
        }

        if self.right > 0.0 {
            let width = self.right;
            let start = last - width;
            Zip::from(flux).and(&wavelength).for_each(|f, &w| {
                if w > start {
                    *f *= ((w - start) / width * FRAC_PI_2 + FRAC_PI_2).sin();
                }
            });
        }
    }
}

/// Private working copy of the observation: edge samples dropped, then tapered.
pub fn prepare_observation(
    observation: &Spectrum,
    skipedge: usize,
    taper: Option<&EdgeTaper>,
) -> CcfResult<Spectrum> {
    let len = observation.len();
    if skipedge.saturating_mul(2) >= len {
        return Err(CcfError::InvalidSkipEdge { skipedge, len });
    }

    let mut prepared = if skipedge > 0 {
        observation.trimmed(skipedge)
    } else {
        observation.clone()
    };

    if let Some(taper) = taper {
        taper.apply(&mut prepared);
    }
    Ok(prepared)
}
