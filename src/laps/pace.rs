use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::laps::DriverLaps;

/// Laps slower than this multiple of the fastest lap are treated as outliers
/// (pit laps, traffic, safety car).
pub const QUICK_LAP_THRESHOLD: f64 = 1.07;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct PaceFilter {
    #[serde(default)]
    pub compound: Option<String>,
    #[serde(default)]
    pub stint: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PacePoint {
    pub lap_number: u32,
    pub lap_time: f64,
    pub compound: Option<String>,
    pub stint: Option<u32>,
}

/// Lap-by-lap pace for one driver, restricted to quick laps of the selected
/// compound and stint.
pub fn race_pace(driver_laps: &DriverLaps, filter: &PaceFilter) -> Vec<PacePoint> {
    let candidates: Vec<PacePoint> = driver_laps
        .laps
        .iter()
        .filter(|lap| match &filter.compound {
            Some(wanted) => lap
                .compound
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
            None => true,
        })
        .filter(|lap| filter.stint.is_none() || lap.stint == filter.stint)
        .filter_map(|lap| {
            lap.lap_time.map(|lap_time| PacePoint {
                lap_number: lap.lap_number,
                lap_time,
                compound: lap.compound.clone(),
                stint: lap.stint,
            })
        })
        .collect();

    let Some(fastest) = candidates.iter().map(|p| p.lap_time).reduce(f64::min) else {
        return Vec::new();
    };
    let cutoff = fastest * QUICK_LAP_THRESHOLD;

    let mut quick: Vec<PacePoint> = candidates
        .into_iter()
        .filter(|p| p.lap_time <= cutoff)
        .collect();
    quick.sort_by_key(|p| p.lap_number);

    log::debug!(
        "{}: {} quick laps (cutoff {:.3}s)",
        driver_laps.driver,
        quick.len(),
        cutoff
    );
    quick
}
