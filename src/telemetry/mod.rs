mod delta;
mod error;
mod position;
mod resample;
mod types;

pub use delta::{compute_speed_delta, compute_time_delta, DeltaSeries};
pub use error::AlignError;
pub use position::{map_channel_to_position, map_to_position, PositionedValue};
pub use resample::{resample, ResampledTrace, DEFAULT_GRID_SIZE};
pub use types::{Channel, TelemetrySample, TelemetryTrace};
