use serde::Serialize;
use utoipa::ToSchema;

use crate::telemetry::{AlignError, Channel, DeltaSeries, ResampledTrace};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PositionedValue {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Tag each delta value with the reference trace's track position at the
/// same grid index.
pub fn map_to_position(
    reference: &ResampledTrace,
    delta: &DeltaSeries,
) -> Result<Vec<PositionedValue>, AlignError> {
    place(reference, &delta.values)
}

/// One of the reference trace's own channels laid along its racing line,
/// e.g. absolute speed around the lap.
pub fn map_channel_to_position(
    reference: &ResampledTrace,
    channel: Channel,
) -> Result<Vec<PositionedValue>, AlignError> {
    place(reference, reference.channel(channel)?)
}

fn place(reference: &ResampledTrace, values: &[f64]) -> Result<Vec<PositionedValue>, AlignError> {
    let xs = reference.channel(Channel::X)?;
    let ys = reference.channel(Channel::Y)?;

    if ys.len() != xs.len() {
        return Err(AlignError::LengthMismatch {
            expected: xs.len(),
            actual: ys.len(),
        });
    }
    if values.len() != xs.len() {
        return Err(AlignError::LengthMismatch {
            expected: xs.len(),
            actual: values.len(),
        });
    }

    Ok(xs
        .iter()
        .zip(ys)
        .zip(values)
        .map(|((&x, &y), &value)| PositionedValue { x, y, value })
        .collect())
}
