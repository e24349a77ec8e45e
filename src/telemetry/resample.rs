use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::telemetry::{AlignError, Channel, TelemetryTrace};

pub const DEFAULT_GRID_SIZE: usize = 2000;

/// Channel values of one trace evaluated at every point of a common grid.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResampledTrace {
    pub driver: String,
    pub lap_number: Option<u32>,
    pub grid: Vec<f64>,
    #[schema(value_type = Object)]
    pub channels: BTreeMap<Channel, Vec<f64>>,
}

impl ResampledTrace {
    pub fn channel(&self, channel: Channel) -> Result<&[f64], AlignError> {
        self.channels
            .get(&channel)
            .map(Vec::as_slice)
            .ok_or_else(|| AlignError::MissingChannel {
                driver: self.driver.clone(),
                channel,
            })
    }

    pub fn has_channel(&self, channel: Channel) -> bool {
        self.channels.contains_key(&channel)
    }
}

/// Two traces projected onto the same distance grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    pub grid: Vec<f64>,
    pub a: ResampledTrace,
    pub b: ResampledTrace,
}

/// Project both traces onto `grid_size` evenly spaced distances covering the
/// longer of the two laps.
pub fn resample(
    a: &TelemetryTrace,
    b: &TelemetryTrace,
    grid_size: usize,
    channels: &[Channel],
) -> Result<Resampled, AlignError> {
    let max_a = a.max_distance().ok_or_else(|| AlignError::EmptyTrace {
        driver: a.driver.clone(),
    })?;
    let max_b = b.max_distance().ok_or_else(|| AlignError::EmptyTrace {
        driver: b.driver.clone(),
    })?;
    if grid_size == 0 {
        return Err(AlignError::InvalidGridSize);
    }

    let grid = build_grid(max_a.max(max_b), grid_size);
    log::debug!(
        "Resampling {} ({} samples) and {} ({} samples) onto {} points up to {:.1} m",
        a.driver,
        a.len(),
        b.driver,
        b.len(),
        grid.len(),
        grid.last().copied().unwrap_or_default()
    );

    let resampled_a = resample_trace(a, &grid, channels)?;
    let resampled_b = resample_trace(b, &grid, channels)?;

    Ok(Resampled {
        grid,
        a: resampled_a,
        b: resampled_b,
    })
}

/// `size` evenly spaced points over `[0, max_distance]`. A non-positive
/// range collapses to `size` zeros.
pub fn build_grid(max_distance: f64, size: usize) -> Vec<f64> {
    if size <= 1 || max_distance <= 0.0 {
        return vec![0.0; size];
    }

    let last = size - 1;
    let step = max_distance / last as f64;
    (0..size)
        .map(|i| if i == last { max_distance } else { i as f64 * step })
        .collect()
}

/// Evaluate one trace's channels on `grid`.
pub fn resample_trace(
    trace: &TelemetryTrace,
    grid: &[f64],
    channels: &[Channel],
) -> Result<ResampledTrace, AlignError> {
    if trace.is_empty() {
        return Err(AlignError::EmptyTrace {
            driver: trace.driver.clone(),
        });
    }

    let distances: Vec<f64> = trace.samples.iter().map(|s| s.distance).collect();
    let mut resampled = BTreeMap::new();

    for &channel in channels {
        let values = channel_values(trace, channel)?;
        let projected = grid
            .iter()
            .map(|&d| interpolate(&distances, &values, d))
            .collect();
        resampled.insert(channel, projected);
    }

    Ok(ResampledTrace {
        driver: trace.driver.clone(),
        lap_number: trace.lap_number,
        grid: grid.to_vec(),
        channels: resampled,
    })
}

/// Raw values of one channel. Time is shifted so the lap starts at zero.
fn channel_values(trace: &TelemetryTrace, channel: Channel) -> Result<Vec<f64>, AlignError> {
    let values = trace
        .samples
        .iter()
        .map(|s| s.value(channel))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| AlignError::MissingChannel {
            driver: trace.driver.clone(),
            channel,
        })?;

    if channel == Channel::Time {
        let origin = values.first().copied().unwrap_or_default();
        return Ok(values.into_iter().map(|t| t - origin).collect());
    }

    Ok(values)
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`, holding the first and
/// last values outside the recorded range. `xp` must be non-decreasing.
pub fn interpolate(xp: &[f64], fp: &[f64], x: f64) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return f64::NAN;
    }

    let idx = xp[..n].partition_point(|&d| d <= x);
    if idx == 0 {
        return fp[0];
    }
    if idx == n {
        return fp[n - 1];
    }

    let (x0, x1) = (xp[idx - 1], xp[idx]);
    let (y0, y1) = (fp[idx - 1], fp[idx]);
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}
