use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::telemetry::{TelemetrySample, TelemetryTrace};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, ToSchema, clap::ValueEnum,
)]
pub enum SessionKind {
    #[serde(rename = "FP1")]
    #[strum(serialize = "FP1")]
    #[value(name = "FP1")]
    Practice1,
    #[serde(rename = "FP2")]
    #[strum(serialize = "FP2")]
    #[value(name = "FP2")]
    Practice2,
    #[serde(rename = "FP3")]
    #[strum(serialize = "FP3")]
    #[value(name = "FP3")]
    Practice3,
    #[serde(rename = "Q")]
    #[strum(serialize = "Q")]
    #[value(name = "Q")]
    Qualifying,
    #[serde(rename = "SQ")]
    #[strum(serialize = "SQ")]
    #[value(name = "SQ")]
    SprintQualifying,
    #[serde(rename = "S")]
    #[strum(serialize = "S")]
    #[value(name = "S")]
    Sprint,
    #[serde(rename = "R")]
    #[strum(serialize = "R")]
    #[value(name = "R")]
    Race,
}

impl SessionKind {
    pub fn is_race(self) -> bool {
        matches!(self, SessionKind::Race | SessionKind::Sprint)
    }
}

/// One timed lap with its telemetry. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    pub lap_number: u32,
    #[serde(default)]
    pub lap_time: Option<f64>,
    #[serde(default)]
    pub sector_times: [Option<f64>; 3],
    #[serde(default)]
    pub compound: Option<String>,
    #[serde(default)]
    pub stint: Option<u32>,
    #[serde(default)]
    pub telemetry: Vec<TelemetrySample>,
}

impl Lap {
    pub fn trace(&self, driver: &str) -> TelemetryTrace {
        TelemetryTrace::new(driver, Some(self.lap_number), self.telemetry.clone())
    }
}

/// Every recorded lap of one driver in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverLaps {
    pub driver: String,
    #[serde(default)]
    pub laps: Vec<Lap>,
}

/// Lap identity without telemetry, for output.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LapSummary {
    pub driver: String,
    pub lap_number: u32,
    pub lap_time: Option<f64>,
    pub compound: Option<String>,
}

impl LapSummary {
    pub fn new(driver: &str, lap: &Lap) -> Self {
        Self {
            driver: driver.to_string(),
            lap_number: lap.lap_number,
            lap_time: lap.lap_time,
            compound: lap.compound.clone(),
        }
    }
}
