mod comparison;
mod error;

pub use comparison::{compare, pace, AnalysisOptions, CompareRequest, Comparison};
pub use error::AnalysisError;
