use ndarray::{Array1, ArrayView1};

/// Zero-mean copy of a series together with its sum of squares.
#[derive(Debug, Clone)]
pub struct CenteredSeries {
    deviations: Array1<f64>,
    sum_sq: f64,
}

impl CenteredSeries {
    pub fn new(values: ArrayView1<f64>) -> Self {
        let mean = StatsHelper::mean(values);
        let deviations = values.mapv(|v| v - mean);
        let sum_sq = deviations.dot(&deviations);
        Self { deviations, sum_sq }
    }

    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }
}

pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: ArrayView1<f64>) -> f64 {
        samples.mean().unwrap_or(0.0)
    }

    /// Pearson coefficient of two centred series of equal length.
    ///
    /// Returns `None` when either variance sum is exactly zero.
    pub fn pearson(lhs: &CenteredSeries, rhs: &CenteredSeries) -> Option<f64> {
        if lhs.sum_sq == 0.0 || rhs.sum_sq == 0.0 {
            return None;
        }
        let cross = lhs.deviations.dot(&rhs.deviations);
        Some(cross / (lhs.sum_sq * rhs.sum_sq).sqrt())
    }
}
