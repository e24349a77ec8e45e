use crate::laps::{DriverLaps, Lap, LapError, SessionKind};

pub const FASTEST_LAPS_LABEL: &str = "Fastest Laps";

#[derive(Debug, Clone)]
pub struct LapSelection<'a> {
    pub lap: &'a Lap,
    pub label: String,
}

/// Pick the lap to analyze: a specific lap number in race sessions when one
/// is requested, otherwise the driver's fastest timed lap.
pub fn select_lap(
    driver_laps: &DriverLaps,
    kind: SessionKind,
    requested: Option<u32>,
) -> Result<LapSelection<'_>, LapError> {
    match requested {
        Some(number) if kind.is_race() => driver_laps
            .laps
            .iter()
            .find(|lap| lap.lap_number == number)
            .map(|lap| LapSelection {
                lap,
                label: format!("Lap {}", number),
            })
            .ok_or_else(|| LapError::NoLapFound {
                driver: driver_laps.driver.clone(),
                lap: Some(number),
            }),
        _ => fastest_lap(driver_laps)
            .map(|lap| LapSelection {
                lap,
                label: FASTEST_LAPS_LABEL.to_string(),
            })
            .ok_or_else(|| LapError::NoLapFound {
                driver: driver_laps.driver.clone(),
                lap: None,
            }),
    }
}

/// Lowest lap time; untimed laps never qualify. Ties go to the earlier lap.
pub fn fastest_lap(driver_laps: &DriverLaps) -> Option<&Lap> {
    driver_laps
        .laps
        .iter()
        .filter_map(|lap| lap.lap_time.map(|time| (time, lap)))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, lap)| lap)
}
