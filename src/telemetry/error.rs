use thiserror::Error;

use crate::telemetry::Channel;

#[derive(Debug, Error, PartialEq)]
pub enum AlignError {
    #[error("telemetry trace for {driver} has no samples")]
    EmptyTrace { driver: String },
    #[error("telemetry trace for {driver} is missing channel '{channel}'")]
    MissingChannel { driver: String, channel: Channel },
    #[error("length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("grid size must be a positive integer")]
    InvalidGridSize,
}
