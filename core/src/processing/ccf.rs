use crate::math::{CenteredSeries, InterpolationBackend, InterpolatorFactory, StatsHelper};
use crate::model::{CorrelationResult, Spectrum};
use crate::prelude::{CcfParams, CcfResult, EngineConfig};
use crate::processing::coverage::{ShiftMode, ShiftModel};
use crate::processing::grid::ShiftGrid;
use crate::processing::prepare::{prepare_observation, EdgeTaper};
use crate::telemetry::log::LogManager;
use rayon::prelude::*;
use std::sync::Arc;

/// Call parameters after range, step, mode and taper validation.
#[derive(Debug, Clone)]
pub struct ResolvedParams {
    pub grid: ShiftGrid,
    pub mode: ShiftMode,
    pub skipedge: usize,
    pub taper: Option<EdgeTaper>,
    rvmin: f64,
    rvmax: f64,
}

impl ResolvedParams {
    /// Validates in a fixed order: range, step, mode, taper. No spectrum is
    /// read here.
    pub fn resolve(params: &CcfParams) -> CcfResult<Self> {
        ShiftGrid::validate(params.rvmin, params.rvmax, params.drv)?;
        let mode: ShiftMode = params.mode.parse()?;
        let taper = match params.edge_taper.as_deref() {
            Some(widths) => EdgeTaper::from_widths(widths)?,
            None => None,
        };
        let grid = ShiftGrid::generate(params.rvmin, params.rvmax, params.drv)?;
        Ok(Self {
            grid,
            mode,
            skipedge: params.skipedge,
            taper,
            rvmin: params.rvmin,
            rvmax: params.rvmax,
        })
    }
}

/// Shift-and-correlate engine computing the CCF of an observation against a
/// template over a radial-velocity grid.
pub struct CrossCorrelationEngine {
    factory: Arc<dyn InterpolatorFactory>,
    parallel: bool,
    logger: LogManager,
}

impl CrossCorrelationEngine {
    pub fn new(factory: Arc<dyn InterpolatorFactory>) -> Self {
        Self {
            factory,
            parallel: true,
            logger: LogManager::new("ccfcore::ccf"),
        }
    }

    /// Resolves the configured backend up front so a missing one is reported
    /// here rather than inside the shift loop.
    pub fn from_config(config: &EngineConfig) -> CcfResult<Self> {
        let backend: InterpolationBackend = config.backend.parse()?;
        Ok(Self::new(Arc::new(backend)).with_parallel(config.parallel))
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.factory.name()
    }

    pub fn compute(
        &self,
        observation: &Spectrum,
        template: &Spectrum,
        params: &CcfParams,
    ) -> CcfResult<CorrelationResult> {
        let resolved = ResolvedParams::resolve(params)?;
        self.compute_resolved(observation, template, resolved)
    }

    pub fn compute_resolved(
        &self,
        observation: &Spectrum,
        template: &Spectrum,
        params: ResolvedParams,
    ) -> CcfResult<CorrelationResult> {
        self.logger.detail(&format!(
            "ccf mode={} shifts={} skipedge={} taper={:?} backend={}",
            params.mode,
            params.grid.len(),
            params.skipedge,
            params.taper,
            self.backend_name()
        ));

        let prepared = prepare_observation(observation, params.skipedge, params.taper.as_ref())?;
        let model = ShiftModel::new(params.mode, &prepared);
        model.validate_coverage(template, &prepared, params.rvmin, params.rvmax)?;

        let reference = CenteredSeries::new(prepared.flux());
        if reference.sum_sq() == 0.0 {
            self.logger
                .warn("observation flux has zero variance; every cc value is NaN");
        }

        let correlate = |rv: &f64| self.correlate_at(*rv, &model, &prepared, template, &reference);
        let cc = if self.parallel {
            params
                .grid
                .values()
                .par_iter()
                .map(correlate)
                .collect::<CcfResult<Vec<f64>>>()?
        } else {
            params
                .grid
                .values()
                .iter()
                .map(correlate)
                .collect::<CcfResult<Vec<f64>>>()?
        };

        self.logger.record(&format!(
            "ccf evaluated {} shifts over {} observed samples",
            cc.len(),
            prepared.len()
        ));
        Ok(CorrelationResult::new(params.grid.into_values(), cc))
    }

    /// Correlation at one shift; NaN when either flux series is constant.
    fn correlate_at(
        &self,
        rv: f64,
        model: &ShiftModel,
        observation: &Spectrum,
        template: &Spectrum,
        reference: &CenteredSeries,
    ) -> CcfResult<f64> {
        let shifted = model.shift_all(template.wavelength(), rv);
        let interpolant = self
            .factory
            .build(shifted.to_vec(), template.flux().to_vec())?;
        let resampled = interpolant.evaluate_many(observation.wavelength())?;
        let candidate = CenteredSeries::new(resampled.view());

        match StatsHelper::pearson(reference, &candidate) {
            Some(cc) => Ok(cc),
            None => {
                if reference.sum_sq() != 0.0 {
                    self.logger.warn(&format!(
                        "shifted template flux has zero variance at rv {rv}; cc is NaN"
                    ));
                }
                Ok(f64::NAN)
            }
        }
    }
}

impl Default for CrossCorrelationEngine {
    fn default() -> Self {
        Self::new(Arc::new(InterpolationBackend::Linear))
    }
}
