//! Radial-velocity cross-correlation for 1-D spectra.
//!
//! A template spectrum is shifted over a grid of radial velocities, resampled
//! onto the observation's wavelengths and compared with the observation
//! through the Pearson correlation coefficient. The template must bracket the
//! observation for every shift in the grid; this is checked before any
//! interpolation happens.

pub mod math;
pub mod model;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use model::{CorrelationResult, Spectrum};
pub use prelude::{CcfError, CcfParams, CcfResult, EngineConfig, ErrorKind};
pub use processing::{CrossCorrelationEngine, ResolvedParams, ShiftMode};

/// Cross-correlates raw wavelength/flux arrays with the default linear
/// interpolation backend and returns `(rv_grid, cc_values)`.
///
/// Parameters are validated before either spectrum is inspected, so range,
/// step, mode and taper errors are reported regardless of the arrays passed.
pub fn crosscorr_rv(
    observation_wavelength: &[f64],
    observation_flux: &[f64],
    template_wavelength: &[f64],
    template_flux: &[f64],
    params: &CcfParams,
) -> CcfResult<(Vec<f64>, Vec<f64>)> {
    let resolved = ResolvedParams::resolve(params)?;
    let observation = Spectrum::new(
        observation_wavelength.to_vec(),
        observation_flux.to_vec(),
    )?;
    let template = Spectrum::new(template_wavelength.to_vec(), template_flux.to_vec())?;
    let result =
        CrossCorrelationEngine::default().compute_resolved(&observation, &template, resolved)?;
    Ok(result.into_parts())
}
