use serde::Serialize;
use utoipa::ToSchema;

use crate::telemetry::{AlignError, Channel, ResampledTrace};

/// Per-grid-point difference `a - b` of one channel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DeltaSeries {
    pub channel: Channel,
    pub grid: Vec<f64>,
    pub values: Vec<f64>,
}

impl DeltaSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Gap at the end of the grid, i.e. at the finish line for time.
    pub fn final_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

/// Negative means A reached each point sooner.
pub fn compute_time_delta(a: &ResampledTrace, b: &ResampledTrace) -> Result<DeltaSeries, AlignError> {
    compute_delta(a, b, Channel::Time)
}

/// Negative means A was slower at that point.
pub fn compute_speed_delta(a: &ResampledTrace, b: &ResampledTrace) -> Result<DeltaSeries, AlignError> {
    compute_delta(a, b, Channel::Speed)
}

pub fn compute_delta(
    a: &ResampledTrace,
    b: &ResampledTrace,
    channel: Channel,
) -> Result<DeltaSeries, AlignError> {
    let expected = a.grid.len();
    ensure_len(expected, b.grid.len())?;

    let values_a = a.channel(channel)?;
    let values_b = b.channel(channel)?;
    ensure_len(expected, values_a.len())?;
    ensure_len(expected, values_b.len())?;

    Ok(DeltaSeries {
        channel,
        grid: a.grid.clone(),
        values: values_a
            .iter()
            .zip(values_b)
            .map(|(va, vb)| va - vb)
            .collect(),
    })
}

fn ensure_len(expected: usize, actual: usize) -> Result<(), AlignError> {
    if expected == actual {
        Ok(())
    } else {
        Err(AlignError::LengthMismatch { expected, actual })
    }
}
