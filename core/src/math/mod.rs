pub mod interp;
pub mod stats;

pub use interp::{InterpolationBackend, Interpolator, InterpolatorFactory};
pub use stats::{CenteredSeries, StatsHelper};
