pub mod ccf;
pub mod coverage;
pub mod grid;
pub mod prepare;

pub use ccf::{CrossCorrelationEngine, ResolvedParams};
pub use coverage::{ShiftMode, ShiftModel};
pub use grid::ShiftGrid;
pub use prepare::{prepare_observation, EdgeTaper};
