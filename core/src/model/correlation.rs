use serde::{Deserialize, Serialize};

/// Cross-correlation values on the radial-velocity grid, in grid order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CorrelationResult {
    pub rv: Vec<f64>,
    pub cc: Vec<f64>,
}

impl CorrelationResult {
    pub fn new(rv: Vec<f64>, cc: Vec<f64>) -> Self {
        debug_assert_eq!(rv.len(), cc.len());
        Self { rv, cc }
    }

    pub fn len(&self) -> usize {
        self.rv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rv.is_empty()
    }

    /// `(rv, cc)` pairs in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.rv.iter().copied().zip(self.cc.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.rv, self.cc)
    }
}
