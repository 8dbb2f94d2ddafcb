use anyhow::Context;
use ccfcore::prelude::{CcfParams, EngineConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Gaussian absorption line of the synthetic template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    pub center: f64,
    pub depth: f64,
    pub width: f64,
}

/// Wavelength sampling and line list of the synthetic template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub start_wavelength: f64,
    pub end_wavelength: f64,
    pub step: f64,
    pub lines: Vec<LineConfig>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        let line = |center, depth| LineConfig {
            center,
            depth,
            width: 0.08,
        };
        Self {
            start_wavelength: 495.0,
            end_wavelength: 515.0,
            step: 0.01,
            lines: vec![
                line(500.9, 0.35),
                line(502.4, 0.6),
                line(504.1, 0.25),
                line(505.7, 0.5),
                line(507.3, 0.4),
                line(509.2, 0.3),
            ],
        }
    }
}

/// Sampling, injected radial velocity and noise of the synthetic observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationConfig {
    pub start_wavelength: f64,
    pub end_wavelength: f64,
    pub step: f64,
    /// Injected radial velocity in km/s.
    pub rv: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            start_wavelength: 500.0,
            end_wavelength: 510.0,
            step: 0.02,
            rv: 25.0,
            noise: 0.01,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    pub template: TemplateConfig,
    pub observation: ObservationConfig,
    pub engine: EngineConfig,
    pub ccf: CcfParams,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            template: TemplateConfig::default(),
            observation: ObservationConfig::default(),
            engine: EngineConfig::default(),
            ccf: CcfParams::new(-100.0, 100.0, 0.5),
        }
    }
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario config {}", path_ref.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario config {}", path_ref.display()))?;
        Ok(config)
    }
}
