use crate::generator::profile::SyntheticPair;
use crate::workflow::config::ScenarioConfig;
use anyhow::Context;
use ccfcore::{CorrelationResult, CrossCorrelationEngine};
use serde::{Deserialize, Serialize};

/// Highest finite correlation value on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPeak {
    pub index: usize,
    pub rv: f64,
    pub cc: f64,
    /// Vertex of the parabola through the peak and its neighbours; equals
    /// `rv` at the grid edges.
    pub refined_rv: f64,
}

pub fn locate_peak(result: &CorrelationResult) -> Option<CorrelationPeak> {
    let (index, cc) = result
        .cc
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, cc)| !cc.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, cc)| match best {
            Some((_, best_cc)) if best_cc >= cc => best,
            _ => Some((i, cc)),
        })?;

    let rv = result.rv[index];
    let mut refined_rv = rv;
    if index > 0 && index + 1 < result.len() {
        let (left, right) = (result.cc[index - 1], result.cc[index + 1]);
        let curvature = left - 2.0 * cc + right;
        if curvature < 0.0 {
            let step = result.rv[index + 1] - rv;
            refined_rv = rv + 0.5 * (left - right) / curvature * step;
        }
    }

    Some(CorrelationPeak {
        index,
        rv,
        cc,
        refined_rv,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub scenario: String,
    pub backend: String,
    pub injected_rv: f64,
    pub peak: Option<CorrelationPeak>,
    pub correlation: CorrelationResult,
}

#[derive(Clone)]
pub struct Runner {
    config: ScenarioConfig,
}

impl Runner {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, pair: &SyntheticPair) -> anyhow::Result<RunSummary> {
        let engine = CrossCorrelationEngine::from_config(&self.config.engine)
            .context("initializing cross-correlation engine")?;
        let correlation = engine
            .compute(&pair.observation, &pair.template, &self.config.ccf)
            .with_context(|| format!("cross-correlating scenario {}", self.config.name))?;
        let peak = locate_peak(&correlation);

        match &peak {
            Some(peak) => log::info!(
                "scenario {}: peak cc {:.4} at rv {:.3} km/s (refined {:.3})",
                self.config.name,
                peak.cc,
                peak.rv,
                peak.refined_rv
            ),
            None => log::warn!(
                "scenario {}: no finite correlation values",
                self.config.name
            ),
        }

        Ok(RunSummary {
            scenario: self.config.name.clone(),
            backend: engine.backend_name().to_string(),
            injected_rv: self.config.observation.rv,
            peak,
            correlation,
        })
    }
}
