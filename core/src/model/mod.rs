pub mod correlation;
pub mod spectrum;

pub use correlation::CorrelationResult;
pub use spectrum::Spectrum;
