use crate::prelude::{CcfError, CcfResult};
use ndarray::{s, Array1, ArrayView1};

/// One-dimensional spectrum with strictly increasing wavelengths.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    wavelength: Array1<f64>,
    flux: Array1<f64>,
}

impl Spectrum {
    pub fn new(wavelength: Vec<f64>, flux: Vec<f64>) -> CcfResult<Self> {
        Self::from_arrays(Array1::from(wavelength), Array1::from(flux))
    }

    pub fn from_arrays(wavelength: Array1<f64>, flux: Array1<f64>) -> CcfResult<Self> {
        if wavelength.len() != flux.len() {
            return Err(CcfError::InvalidSpectrum(format!(
                "{} wavelengths but {} flux values",
                wavelength.len(),
                flux.len()
            )));
        }
        if wavelength.is_empty() {
            return Err(CcfError::InvalidSpectrum("no samples".into()));
        }
        if let Some(idx) = wavelength
            .iter()
            .chain(flux.iter())
            .position(|v| !v.is_finite())
        {
            return Err(CcfError::InvalidSpectrum(format!(
                "non-finite value at position {}",
                idx % wavelength.len()
            )));
        }
        if let Some(idx) = wavelength
            .iter()
            .zip(wavelength.iter().skip(1))
            .position(|(prev, next)| next <= prev)
        {
            return Err(CcfError::InvalidSpectrum(format!(
                "wavelength not strictly increasing at index {}",
                idx + 1
            )));
        }
        Ok(Self { wavelength, flux })
    }

    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    pub fn wavelength(&self) -> ArrayView1<'_, f64> {
        self.wavelength.view()
    }

    pub fn flux(&self) -> ArrayView1<'_, f64> {
        self.flux.view()
    }

    /// Wavelengths alongside mutable flux, for in-place flux transforms.
    pub(crate) fn split_mut(&mut self) -> (ArrayView1<'_, f64>, &mut Array1<f64>) {
        (self.wavelength.view(), &mut self.flux)
    }

    pub fn first_wavelength(&self) -> f64 {
        self.wavelength[0]
    }

    pub fn last_wavelength(&self) -> f64 {
        self.wavelength[self.len() - 1]
    }

    /// Copy without `count` samples at either end. Callers guarantee
    /// `2 * count < len`.
    pub(crate) fn trimmed(&self, count: usize) -> Self {
        let end = self.len() - count;
        Self {
            wavelength: self.wavelength.slice(s![count..end]).to_owned(),
            flux: self.flux.slice(s![count..end]).to_owned(),
        }
    }
}
