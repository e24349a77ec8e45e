use serde::Serialize;
use utoipa::ToSchema;

use crate::laps::Lap;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SectorDelta {
    /// 1-based sector index.
    pub sector: u8,
    pub time_a: f64,
    pub time_b: f64,
    /// `time_a - time_b`, negative when A was quicker.
    pub delta: f64,
    pub faster: String,
}

pub fn compare_sectors(driver_a: &str, lap_a: &Lap, driver_b: &str, lap_b: &Lap) -> Vec<SectorDelta> {
    lap_a
        .sector_times
        .iter()
        .zip(&lap_b.sector_times)
        .enumerate()
        .filter_map(|(i, (a, b))| {
            let (time_a, time_b) = ((*a)?, (*b)?);
            let delta = time_a - time_b;
            Some(SectorDelta {
                sector: i as u8 + 1,
                time_a,
                time_b,
                delta,
                faster: (if delta < 0.0 { driver_a } else { driver_b }).to_string(),
            })
        })
        .collect()
}
