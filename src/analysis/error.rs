use thiserror::Error;

use crate::laps::LapError;
use crate::session::ProviderError;
use crate::telemetry::AlignError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("driver {driver} did not take part in {session}")]
    UnknownDriver { driver: String, session: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Lap(#[from] LapError),
    #[error("alignment error: {0}")]
    Align(#[from] AlignError),
}
