use serde::{Deserialize, Serialize};
use std::fmt;

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KMS: f64 = 299_792.458;

/// Engine-level configuration shared by every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the interpolation backend (`"linear"` or `"nearest"`).
    pub backend: String,
    /// Evaluate the shift grid on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: "linear".to_string(),
            parallel: true,
        }
    }
}

/// Per-call parameters of a cross-correlation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcfParams {
    pub rvmin: f64,
    pub rvmax: f64,
    pub drv: f64,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub skipedge: usize,
    /// Zero, one (both edges) or two (left, right) taper widths.
    #[serde(default)]
    pub edge_taper: Option<Vec<f64>>,
}

fn default_mode() -> String {
    "doppler".to_string()
}

impl CcfParams {
    pub fn new(rvmin: f64, rvmax: f64, drv: f64) -> Self {
        Self {
            rvmin,
            rvmax,
            drv,
            mode: default_mode(),
            skipedge: 0,
            edge_taper: None,
        }
    }

    pub fn with_mode(mut self, mode: &str) -> Self {
        self.mode = mode.to_string();
        self
    }

    pub fn with_skipedge(mut self, skipedge: usize) -> Self {
        self.skipedge = skipedge;
        self
    }

    pub fn with_edge_taper(mut self, widths: Vec<f64>) -> Self {
        self.edge_taper = Some(widths);
        self
    }
}

/// Spectrum edge addressed by a taper width or a coverage bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageBound {
    /// Shortest observed wavelength.
    Lower,
    /// Longest observed wavelength.
    Upper,
}

impl fmt::Display for CoverageBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageBound::Lower => write!(f, "minimum"),
            CoverageBound::Upper => write!(f, "maximum"),
        }
    }
}

/// Reason an edge-taper specification was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TaperFault {
    #[error("expected one or two widths, got {count}")]
    Malformed { count: usize },
    #[error("{edge} edge width must be a finite number >= 0, got {width}")]
    Negative { edge: CoverageBound, width: f64 },
}

/// Coarse taxonomy used by callers that only care about the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Coverage,
    DependencyUnavailable,
    Interpolation,
}

/// Common error type for cross-correlation runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CcfError {
    #[error("rvmin ({rvmin}) and rvmax ({rvmax}) must be finite with rvmin < rvmax")]
    InvalidRange { rvmin: f64, rvmax: f64 },
    #[error("rv step must be a positive finite number, got {drv}")]
    InvalidStep { drv: f64 },
    #[error("rv grid would hold {estimate} shifts, more than the limit of {max}; increase drv")]
    GridTooLarge { estimate: f64, max: usize },
    #[error("unknown shift mode '{0}'; available modes are 'linear' and 'doppler'")]
    UnsupportedMode(String),
    #[error("invalid edge taper: {0}")]
    InvalidTaper(TaperFault),
    #[error("skipedge {skipedge} leaves no samples of a {len}-sample observation")]
    InvalidSkipEdge { skipedge: usize, len: usize },
    #[error("invalid spectrum: {0}")]
    InvalidSpectrum(String),
    #[error(
        "the {bound} wavelength is not covered by the template for all rv shifts \
         (template reaches {reached}, observation needs {required}); \
         provide a larger template or increase skipedge"
    )]
    InsufficientCoverage {
        bound: CoverageBound,
        reached: f64,
        required: f64,
    },
    #[error("interpolation backend '{backend}' is not available")]
    DependencyUnavailable { backend: String },
    #[error("interpolator needs {0}")]
    InvalidSamples(String),
    #[error("interpolation query {x} outside domain [{min}, {max}]")]
    OutOfDomain { x: f64, min: f64, max: f64 },
}

impl CcfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CcfError::InvalidRange { .. }
            | CcfError::InvalidStep { .. }
            | CcfError::GridTooLarge { .. }
            | CcfError::UnsupportedMode(_)
            | CcfError::InvalidTaper(_)
            | CcfError::InvalidSkipEdge { .. }
            | CcfError::InvalidSpectrum(_) => ErrorKind::Configuration,
            CcfError::InsufficientCoverage { .. } => ErrorKind::Coverage,
            CcfError::DependencyUnavailable { .. } => ErrorKind::DependencyUnavailable,
            CcfError::InvalidSamples(_) | CcfError::OutOfDomain { .. } => ErrorKind::Interpolation,
        }
    }
}

pub type CcfResult<T> = Result<T, CcfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_default_to_doppler_without_trimming() {
        let params = CcfParams::new(-10.0, 10.0, 1.0);
        assert_eq!(params.mode, "doppler");
        assert_eq!(params.skipedge, 0);
        assert!(params.edge_taper.is_none());
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: CcfParams =
            serde_json::from_str(r#"{"rvmin": -5.0, "rvmax": 5.0, "drv": 0.5}"#).unwrap();
        assert_eq!(params, CcfParams::new(-5.0, 5.0, 0.5));
    }

    #[test]
    fn coverage_error_names_the_failing_bound() {
        let err = CcfError::InsufficientCoverage {
            bound: CoverageBound::Upper,
            reached: 509.0,
            required: 510.0,
        };
        assert!(err.to_string().contains("maximum wavelength"));
        assert_eq!(err.kind(), ErrorKind::Coverage);
    }

    #[test]
    fn configuration_errors_share_a_kind() {
        let errors = [
            CcfError::InvalidRange {
                rvmin: 1.0,
                rvmax: 0.0,
            },
            CcfError::UnsupportedMode("quadratic".into()),
            CcfError::InvalidTaper(TaperFault::Malformed { count: 3 }),
            CcfError::InvalidSkipEdge {
                skipedge: 4,
                len: 8,
            },
        ];
        assert!(errors
            .iter()
            .all(|err| err.kind() == ErrorKind::Configuration));
    }
}
