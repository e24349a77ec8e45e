use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// A per-sample telemetry quantity that can be projected onto a distance grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Channel {
    Time,
    Speed,
    Throttle,
    Brake,
    Gear,
    X,
    Y,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Time,
        Channel::Speed,
        Channel::Throttle,
        Channel::Brake,
        Channel::Gear,
        Channel::X,
        Channel::Y,
    ];
}

/// One recorded instant of a lap. Distance is metres from the start line,
/// time is seconds on whatever clock the recorder used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub distance: f64,
    pub time: f64,
    pub speed: Option<f64>,
    pub throttle: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_brake")]
    pub brake: Option<f64>,
    pub gear: Option<u8>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl TelemetrySample {
    pub fn value(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Time => Some(self.time),
            Channel::Speed => self.speed,
            Channel::Throttle => self.throttle,
            Channel::Brake => self.brake,
            Channel::Gear => self.gear.map(f64::from),
            Channel::X => self.x,
            Channel::Y => self.y,
        }
    }
}

/// Brake is recorded either as an on/off flag or as a normalized pressure.
fn deserialize_brake<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Pressure(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Flag(true) => 1.0,
        Raw::Flag(false) => 0.0,
        Raw::Pressure(p) => p,
    }))
}

/// One lap of one driver, in recording order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryTrace {
    pub driver: String,
    pub lap_number: Option<u32>,
    pub samples: Vec<TelemetrySample>,
}

impl TelemetryTrace {
    pub fn new(driver: impl Into<String>, lap_number: Option<u32>, samples: Vec<TelemetrySample>) -> Self {
        Self {
            driver: driver.into(),
            lap_number,
            samples,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn max_distance(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.distance)
            .reduce(f64::max)
    }

    /// True when every sample carries the channel.
    pub fn has_channel(&self, channel: Channel) -> bool {
        !self.samples.is_empty() && self.samples.iter().all(|s| s.value(channel).is_some())
    }

    /// Copy of the trace with every sample whose distance falls below the
    /// running maximum removed. Returns the copy and the number of dropped samples.
    pub fn monotonic(&self) -> (TelemetryTrace, usize) {
        let mut samples = Vec::with_capacity(self.samples.len());
        let mut furthest = f64::NEG_INFINITY;

        for sample in &self.samples {
            if sample.distance >= furthest {
                furthest = sample.distance;
                samples.push(sample.clone());
            }
        }

        let dropped = self.samples.len() - samples.len();
        (
            TelemetryTrace {
                driver: self.driver.clone(),
                lap_number: self.lap_number,
                samples,
            },
            dropped,
        )
    }
}
