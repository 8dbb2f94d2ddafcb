use crate::prelude::{CcfError, CcfResult};
use ndarray::{Array1, ArrayView1};
use std::str::FromStr;

/// A 1-D interpolant over a fixed, strictly increasing domain.
///
/// Queries outside the domain are errors; the interpolant never
/// extrapolates.
pub trait Interpolator: Send + Sync {
    fn domain(&self) -> (f64, f64);

    fn evaluate(&self, x: f64) -> CcfResult<f64>;

    fn evaluate_many(&self, xs: ArrayView1<f64>) -> CcfResult<Array1<f64>> {
        xs.iter()
            .map(|&x| self.evaluate(x))
            .collect::<CcfResult<Vec<_>>>()
            .map(Array1::from)
    }
}

/// Builds interpolants from sampled `(x, y)` pairs.
pub trait InterpolatorFactory: Send + Sync {
    fn name(&self) -> &'static str;

    fn build(&self, x: Vec<f64>, y: Vec<f64>) -> CcfResult<Box<dyn Interpolator>>;
}

/// Validated sample table shared by the built-in interpolants.
#[derive(Debug, Clone)]
struct SampleTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleTable {
    fn new(x: Vec<f64>, y: Vec<f64>) -> CcfResult<Self> {
        if x.len() != y.len() {
            return Err(CcfError::InvalidSamples(format!(
                "matching x/y lengths, got {} and {}",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(CcfError::InvalidSamples(format!(
                "at least 2 samples, got {}",
                x.len()
            )));
        }
        if x.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(CcfError::InvalidSamples(
                "strictly increasing x values".into(),
            ));
        }
        Ok(Self { x, y })
    }

    fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Index `i` of the bracketing interval `[x[i], x[i + 1]]`.
    fn bracket(&self, query: f64) -> CcfResult<usize> {
        let (min, max) = self.domain();
        // NaN fails both comparisons and lands here as well.
        if !(query >= min && query <= max) {
            return Err(CcfError::OutOfDomain { x: query, min, max });
        }
        let upper = self.x.partition_point(|&v| v <= query);
        Ok(upper.clamp(1, self.x.len() - 1) - 1)
    }
}

/// Piecewise-linear interpolation between neighbouring samples.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    table: SampleTable,
}

impl LinearInterpolator {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> CcfResult<Self> {
        Ok(Self {
            table: SampleTable::new(x, y)?,
        })
    }
}

impl Interpolator for LinearInterpolator {
    fn domain(&self) -> (f64, f64) {
        self.table.domain()
    }

    fn evaluate(&self, x: f64) -> CcfResult<f64> {
        let lo = self.table.bracket(x)?;
        let (x_lo, x_hi) = (self.table.x[lo], self.table.x[lo + 1]);
        let (y_lo, y_hi) = (self.table.y[lo], self.table.y[lo + 1]);
        let slope = (y_hi - y_lo) / (x_hi - x_lo);
        Ok(slope * (x - x_lo) + y_lo)
    }
}

/// Nearest-sample lookup; exact midpoints resolve to the lower sample.
#[derive(Debug, Clone)]
pub struct NearestInterpolator {
    table: SampleTable,
}

impl NearestInterpolator {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> CcfResult<Self> {
        Ok(Self {
            table: SampleTable::new(x, y)?,
        })
    }
}

impl Interpolator for NearestInterpolator {
    fn domain(&self) -> (f64, f64) {
        self.table.domain()
    }

    fn evaluate(&self, x: f64) -> CcfResult<f64> {
        let lo = self.table.bracket(x)?;
        let midpoint = 0.5 * (self.table.x[lo] + self.table.x[lo + 1]);
        let idx = if x <= midpoint { lo } else { lo + 1 };
        Ok(self.table.y[idx])
    }
}

/// Interpolation backends bundled with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationBackend {
    #[default]
    Linear,
    Nearest,
}

impl FromStr for InterpolationBackend {
    type Err = CcfError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "linear" => Ok(InterpolationBackend::Linear),
            "nearest" => Ok(InterpolationBackend::Nearest),
            other => Err(CcfError::DependencyUnavailable {
                backend: other.to_string(),
            }),
        }
    }
}

impl InterpolatorFactory for InterpolationBackend {
    fn name(&self) -> &'static str {
        match self {
            InterpolationBackend::Linear => "linear",
            InterpolationBackend::Nearest => "nearest",
        }
    }

    fn build(&self, x: Vec<f64>, y: Vec<f64>) -> CcfResult<Box<dyn Interpolator>> {
        let interpolant: Box<dyn Interpolator> = match self {
            InterpolationBackend::Linear => Box::new(LinearInterpolator::new(x, y)?),
            InterpolationBackend::Nearest => Box::new(NearestInterpolator::new(x, y)?),
        };
        Ok(interpolant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn ramp() -> (Vec<f64>, Vec<f64>) {
        (vec![0.0, 1.0, 2.0, 4.0], vec![0.0, 10.0, 20.0, 0.0])
    }

    #[test]
    fn linear_interpolates_between_samples() {
        let (x, y) = ramp();
        let interp = LinearInterpolator::new(x, y).unwrap();
        assert_abs_diff_eq!(interp.evaluate(0.5).unwrap(), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.evaluate(3.0).unwrap(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn linear_reproduces_knots_exactly() {
        let (x, y) = ramp();
        let interp = LinearInterpolator::new(x.clone(), y.clone()).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert_eq!(interp.evaluate(*xi).unwrap(), *yi);
        }
    }

    #[test]
    fn queries_outside_domain_fail_loudly() {
        let (x, y) = ramp();
        let interp = LinearInterpolator::new(x, y).unwrap();
        let err = interp.evaluate(4.5).unwrap_err();
        assert_eq!(
            err,
            CcfError::OutOfDomain {
                x: 4.5,
                min: 0.0,
                max: 4.0
            }
        );
        assert!(interp.evaluate(f64::NAN).is_err());
        assert!(interp.evaluate_many(array![1.0, -0.1].view()).is_err());
    }

    #[test]
    fn nearest_picks_closest_sample() {
        let (x, y) = ramp();
        let interp = NearestInterpolator::new(x, y).unwrap();
        assert_eq!(interp.evaluate(0.4).unwrap(), 0.0);
        assert_eq!(interp.evaluate(0.5).unwrap(), 0.0);
        assert_eq!(interp.evaluate(0.6).unwrap(), 10.0);
        assert_eq!(interp.evaluate(4.0).unwrap(), 0.0);
    }

    #[test]
    fn construction_requires_two_increasing_samples() {
        assert!(LinearInterpolator::new(vec![1.0], vec![1.0]).is_err());
        assert!(LinearInterpolator::new(vec![1.0, 1.0], vec![1.0, 2.0]).is_err());
        assert!(NearestInterpolator::new(vec![1.0, 2.0], vec![1.0]).is_err());
    }

    #[test]
    fn unknown_backend_is_unavailable() {
        let err = "cubic".parse::<InterpolationBackend>().unwrap_err();
        assert_eq!(
            err,
            CcfError::DependencyUnavailable {
                backend: "cubic".into()
            }
        );
        let backend: InterpolationBackend = "nearest".parse().unwrap();
        assert_eq!(backend.name(), "nearest");
    }

    #[test]
    fn backend_builds_boxed_interpolants() {
        let (x, y) = ramp();
        let interp = InterpolationBackend::Linear.build(x, y).unwrap();
        assert_eq!(interp.domain(), (0.0, 4.0));
        let values = interp.evaluate_many(array![0.0, 1.5].view()).unwrap();
        assert_eq!(values.to_vec(), vec![0.0, 15.0]);
    }
}
