use crate::workflow::config::{LineConfig, TemplateConfig};
use anyhow::{ensure, Context};
use ccfcore::prelude::SPEED_OF_LIGHT_KMS;
use ccfcore::Spectrum;

/// Evenly spaced wavelengths from `start` up to and including `end`.
pub fn wavelength_grid(start: f64, end: f64, step: f64) -> anyhow::Result<Vec<f64>> {
    ensure!(step > 0.0, "wavelength step must be positive, got {step}");
    ensure!(end > start, "wavelength range [{start}, {end}] is empty");
    let count = ((end - start) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| start + step * i as f64).collect())
}

/// Continuum-normalised flux of a line list, Doppler-shifted by `rv` km/s.
pub fn line_flux(lines: &[LineConfig], wavelength: f64, rv: f64) -> f64 {
    let factor = 1.0 + rv / SPEED_OF_LIGHT_KMS;
    lines.iter().fold(1.0, |flux, line| {
        let offset = wavelength - line.center * factor;
        flux - line.depth * (-offset * offset / (2.0 * line.width * line.width)).exp()
    })
}

pub fn build_template(config: &TemplateConfig) -> anyhow::Result<Spectrum> {
    let wavelength = wavelength_grid(config.start_wavelength, config.end_wavelength, config.step)
        .context("building template wavelength grid")?;
    let flux = wavelength
        .iter()
        .map(|&w| line_flux(&config.lines, w, 0.0))
        .collect();
    Spectrum::new(wavelength, flux).context("assembling template spectrum")
}
