use crate::generator::template::{build_template, line_flux, wavelength_grid};
use crate::workflow::config::{ObservationConfig, ScenarioConfig, TemplateConfig};
use anyhow::{ensure, Context};
use ccfcore::Spectrum;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Template and observation generated from one scenario.
#[derive(Debug, Clone)]
pub struct SyntheticPair {
    pub template: Spectrum,
    pub observation: Spectrum,
}

/// Samples the template line list at the injected radial velocity on the
/// observation grid and adds uniform noise in `[-noise, noise)`.
pub fn build_observation(
    template: &TemplateConfig,
    config: &ObservationConfig,
) -> anyhow::Result<Spectrum> {
    ensure!(
        config.noise >= 0.0,
        "observation noise must be non-negative, got {}",
        config.noise
    );
    let wavelength = wavelength_grid(config.start_wavelength, config.end_wavelength, config.step)
        .context("building observation wavelength grid")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let flux = wavelength
        .iter()
        .map(|&w| {
            let jitter = if config.noise > 0.0 {
                rng.gen_range(-config.noise..config.noise)
            } else {
                0.0
            };
            line_flux(&template.lines, w, config.rv) + jitter
        })
        .collect();

    Spectrum::new(wavelength, flux).context("assembling observation spectrum")
}

pub fn build_scenario(config: &ScenarioConfig) -> anyhow::Result<SyntheticPair> {
    Ok(SyntheticPair {
        template: build_template(&config.template)?,
        observation: build_observation(&config.template, &config.observation)?,
    })
}
