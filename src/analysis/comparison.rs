use log::{info, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis::AnalysisError;
use crate::landmarks::{Landmark, LandmarkCatalog, ZoomRange};
use crate::laps::{compare_sectors, race_pace, select_lap, DriverLaps, LapSummary, PaceFilter, PacePoint, SectorDelta, SessionKind};
use crate::session::Session;
use crate::telemetry::{
    compute_speed_delta, compute_time_delta, map_channel_to_position, map_to_position, resample, Channel, DeltaSeries,
    PositionedValue, ResampledTrace, TelemetryTrace, DEFAULT_GRID_SIZE,
};

/// Overlay channels carried along when both laps recorded them.
const OPTIONAL_CHANNELS: [Channel; 5] = [
    Channel::Throttle,
    Channel::Brake,
    Channel::Gear,
    Channel::X,
    Channel::Y,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    pub grid_size: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct CompareRequest {
    pub driver_a: String,
    pub driver_b: String,
    /// Lap number to compare in race sessions; fastest laps otherwise.
    #[serde(default)]
    pub lap: Option<u32>,
    #[serde(default)]
    pub zoom: Option<ZoomRange>,
}

/// Both laps aligned on one distance grid, with everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Comparison {
    pub year: u16,
    pub event: String,
    pub session: SessionKind,
    pub label: String,
    pub lap_a: LapSummary,
    pub lap_b: LapSummary,
    pub grid: Vec<f64>,
    pub trace_a: ResampledTrace,
    pub trace_b: ResampledTrace,
    pub time_delta: DeltaSeries,
    pub speed_delta: DeltaSeries,
    /// Speed delta placed on driver A's racing line.
    pub speed_map: Option<Vec<PositionedValue>>,
    /// Driver A's own speed along the same line.
    pub speed_field_a: Option<Vec<PositionedValue>>,
    pub landmarks: Vec<Landmark>,
    pub zoom: Option<ZoomRange>,
    pub zoomed_landmarks: Option<Vec<Landmark>>,
    pub sectors: Vec<SectorDelta>,
}

pub fn compare(
    session: &Session,
    request: &CompareRequest,
    options: &AnalysisOptions,
    catalog: &LandmarkCatalog,
) -> Result<Comparison, AnalysisError> {
    let laps_a = driver_laps(session, &request.driver_a)?;
    let laps_b = driver_laps(session, &request.driver_b)?;

    let selection_a = select_lap(laps_a, session.kind, request.lap)?;
    let selection_b = select_lap(laps_b, session.kind, request.lap)?;

    info!(
        "Comparing {} lap {} vs {} lap {} ({} {} {})",
        laps_a.driver,
        selection_a.lap.lap_number,
        laps_b.driver,
        selection_b.lap.lap_number,
        session.year,
        session.event,
        session.kind
    );

    let trace_a = sanitized(selection_a.lap.trace(&laps_a.driver));
    let trace_b = sanitized(selection_b.lap.trace(&laps_b.driver));

    let mut channels = vec![Channel::Time, Channel::Speed];
    channels.extend(
        OPTIONAL_CHANNELS
            .iter()
            .copied()
            .filter(|&c| trace_a.has_channel(c) && trace_b.has_channel(c)),
    );

    let resampled = resample(&trace_a, &trace_b, options.grid_size, &channels)?;
    let time_delta = compute_time_delta(&resampled.a, &resampled.b)?;
    let speed_delta = compute_speed_delta(&resampled.a, &resampled.b)?;

    let (speed_map, speed_field_a) =
        if resampled.a.has_channel(Channel::X) && resampled.a.has_channel(Channel::Y) {
            (
                Some(map_to_position(&resampled.a, &speed_delta)?),
                Some(map_channel_to_position(&resampled.a, Channel::Speed)?),
            )
        } else {
            (None, None)
        };

    let landmarks = annotate(session, catalog, None);
    let zoomed_landmarks = request.zoom.map(|z| annotate(session, catalog, Some(z)));

    let sectors = compare_sectors(
        &laps_a.driver,
        selection_a.lap,
        &laps_b.driver,
        selection_b.lap,
    );

    Ok(Comparison {
        year: session.year,
        event: session.event.clone(),
        session: session.kind,
        label: selection_a.label,
        lap_a: LapSummary::new(&laps_a.driver, selection_a.lap),
        lap_b: LapSummary::new(&laps_b.driver, selection_b.lap),
        grid: resampled.grid,
        trace_a: resampled.a,
        trace_b: resampled.b,
        time_delta,
        speed_delta,
        speed_map,
        speed_field_a,
        landmarks,
        zoom: request.zoom,
        zoomed_landmarks,
        sectors,
    })
}

/// Quick-lap pace of one driver in a session.
pub fn pace(session: &Session, driver: &str, filter: &PaceFilter) -> Result<Vec<PacePoint>, AnalysisError> {
    let laps = driver_laps(session, driver)?;
    Ok(race_pace(laps, filter))
}

fn driver_laps<'a>(session: &'a Session, driver: &str) -> Result<&'a DriverLaps, AnalysisError> {
    session
        .driver(driver)
        .ok_or_else(|| AnalysisError::UnknownDriver {
            driver: driver.to_string(),
            session: session.key().to_string(),
        })
}

fn sanitized(trace: TelemetryTrace) -> TelemetryTrace {
    let (clean, dropped) = trace.monotonic();
    if dropped > 0 {
        warn!(
            "Dropped {} samples with regressing distance from {} lap {:?}",
            dropped, trace.driver, trace.lap_number
        );
    }
    clean
}

fn annotate(session: &Session, catalog: &LandmarkCatalog, zoom: Option<ZoomRange>) -> Vec<Landmark> {
    match &session.corners {
        Some(corners) => corners.annotate(zoom),
        None => catalog.annotate(session.course(), zoom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LandmarkSet;
    use crate::laps::{Lap, LapError};
    use crate::telemetry::{AlignError, TelemetrySample};

    fn sample(distance: f64, time: f64, speed: f64, with_position: bool) -> TelemetrySample {
        TelemetrySample {
            distance,
            time,
            speed: Some(speed),
            throttle: Some(if speed > 200.0 { 100.0 } else { 40.0 }),
            brake: Some(if speed > 200.0 { 0.0 } else { 1.0 }),
            gear: Some(if speed > 200.0 { 7 } else { 4 }),
            x: with_position.then_some(distance * 0.5),
            y: with_position.then_some(distance * 0.25),
        }
    }

    fn lap(number: u32, lap_time: f64, pace: f64, with_position: bool) -> Lap {
        let telemetry = (0..=50)
            .map(|i| {
                let d = i as f64 * 100.0;
                let speed = if i % 10 < 3 { 150.0 } else { 280.0 };
                sample(d, 1000.0 + i as f64 * pace, speed, with_position)
            })
            .collect();
        Lap {
            lap_number: number,
            lap_time: Some(lap_time),
            sector_times: [Some(22.0 * pace), Some(30.0 * pace), None],
            compound: Some("SOFT".into()),
            stint: Some(1),
            telemetry,
        }
    }

    fn session(kind: SessionKind) -> Session {
        Session {
            year: 2024,
            event: "Spain".into(),
            kind,
            course: None,
            corners: None,
            drivers: vec![
                DriverLaps {
                    driver: "VER".into(),
                    laps: vec![lap(1, 73.0, 1.46, true), lap(2, 72.0, 1.44, true)],
                },
                DriverLaps {
                    driver: "NOR".into(),
                    laps: vec![lap(1, 72.5, 1.45, false), lap(2, 72.9, 1.458, false)],
                },
            ],
        }
    }

    fn request() -> CompareRequest {
        CompareRequest {
            driver_a: "VER".into(),
            driver_b: "NOR".into(),
            lap: None,
            zoom: Some(ZoomRange::new(1500.0, 3500.0)),
        }
    }

    #[test]
    fn test_fastest_lap_comparison() {
        let s = session(SessionKind::Qualifying);
        let out = compare(&s, &request(), &AnalysisOptions::default(), &LandmarkCatalog::builtin()).unwrap();

        assert_eq!(out.label, "Fastest Laps");
        assert_eq!(out.lap_a.lap_number, 2);
        assert_eq!(out.lap_b.lap_number, 1);
        assert_eq!(out.grid.len(), DEFAULT_GRID_SIZE);
        assert_eq!(out.time_delta.len(), DEFAULT_GRID_SIZE);
        assert_eq!(*out.grid.last().unwrap(), 5000.0);

        // VER covers every 100 m in 1.44 s against NOR's 1.45 s
        let final_gap = out.time_delta.final_value().unwrap();
        assert!((final_gap - (50.0 * 1.44 - 50.0 * 1.45)).abs() < 1e-9);

        // NOR has no position data, so X/Y are dropped and no speed map is built
        assert!(!out.trace_a.has_channel(Channel::X));
        assert!(out.speed_map.is_none());
        assert!(out.speed_field_a.is_none());
        assert!(out.trace_a.has_channel(Channel::Gear));

        assert_eq!(out.landmarks.len(), 9);
        let zoomed: Vec<_> = out
            .zoomed_landmarks
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(zoomed, vec!["T4", "T5", "T7", "T9", "T10"]);
        assert_eq!(out.sectors.len(), 2);
        assert_eq!(out.sectors[0].faster, "VER");
    }

    #[test]
    fn test_specific_race_lap_with_speed_map() {
        let mut s = session(SessionKind::Race);
        s.drivers[1].laps = vec![lap(1, 72.5, 1.45, true)];
        let req = CompareRequest {
            lap: Some(1),
            zoom: None,
            ..request()
        };
        let out = compare(&s, &req, &AnalysisOptions { grid_size: 101 }, &LandmarkCatalog::default()).unwrap();

        assert_eq!(out.label, "Lap 1");
        assert_eq!(out.lap_a.lap_number, 1);
        let map = out.speed_map.unwrap();
        assert_eq!(map.len(), 101);
        assert_eq!(map[100].x, 2500.0);
        assert!(map.iter().all(|p| p.value == 0.0));

        let field = out.speed_field_a.unwrap();
        assert_eq!(field.len(), 101);
        assert_eq!((field[10].x, field[10].y), (map[10].x, map[10].y));
        assert_eq!(field[0].value, 150.0);
        assert_eq!(field[10].value, 280.0);
        assert_eq!(field[100].value, 150.0);
        assert!(out.landmarks.is_empty());
        assert!(out.zoomed_landmarks.is_none());
    }

    #[test]
    fn test_session_corners_take_precedence() {
        let mut s = session(SessionKind::Qualifying);
        s.corners = Some(LandmarkSet::from_pairs([("T1", 700.0), ("T2", 1900.0)]));
        let out = compare(&s, &request(), &AnalysisOptions::default(), &LandmarkCatalog::builtin()).unwrap();
        assert_eq!(out.landmarks.len(), 2);
        assert_eq!(out.zoomed_landmarks.unwrap().len(), 1);
    }

    #[test]
    fn test_self_comparison_is_flat() {
        let s = session(SessionKind::Qualifying);
        let req = CompareRequest {
            driver_b: "ver".into(),
            ..request()
        };
        let out = compare(&s, &req, &AnalysisOptions::default(), &LandmarkCatalog::builtin()).unwrap();
        assert!(out.time_delta.values.iter().all(|v| *v == 0.0));
        assert!(out.speed_delta.values.iter().all(|v| *v == 0.0));
        assert!(out.speed_map.is_some());
    }

    #[test]
    fn test_unknown_driver() {
        let s = session(SessionKind::Qualifying);
        let req = CompareRequest {
            driver_b: "HAM".into(),
            ..request()
        };
        let err = compare(&s, &req, &AnalysisOptions::default(), &LandmarkCatalog::builtin()).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownDriver { ref driver, .. } if driver == "HAM"));
    }

    #[test]
    fn test_missing_race_lap_aborts() {
        let s = session(SessionKind::Race);
        let req = CompareRequest {
            lap: Some(30),
            ..request()
        };
        let err = compare(&s, &req, &AnalysisOptions::default(), &LandmarkCatalog::builtin()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Lap(LapError::NoLapFound { lap: Some(30), .. })
        ));
    }

    #[test]
    fn test_lap_without_telemetry() {
        let mut s = session(SessionKind::Qualifying);
        s.drivers[1].laps[0].telemetry.clear();
        let err = compare(&s, &request(), &AnalysisOptions::default(), &LandmarkCatalog::builtin()).unwrap_err();
        assert!(matches!(err, AnalysisError::Align(AlignError::EmptyTrace { ref driver }) if driver == "NOR"));
    }

    #[test]
    fn test_missing_speed_channel() {
        let mut s = session(SessionKind::Qualifying);
        s.drivers[1].laps[0].telemetry[3].speed = None;
        let err = compare(&s, &request(), &AnalysisOptions::default(), &LandmarkCatalog::builtin()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Align(AlignError::MissingChannel { channel: Channel::Speed, .. })
        ));
    }

    #[test]
    fn test_regressing_distance_is_sanitized() {
        let mut s = session(SessionKind::Qualifying);
        s.drivers[1].laps[0].telemetry[10].distance = 850.0;
        let out = compare(&s, &request(), &AnalysisOptions::default(), &LandmarkCatalog::builtin()).unwrap();
        assert_eq!(out.grid.len(), DEFAULT_GRID_SIZE);
    }

    #[test]
    fn test_pace_for_driver() {
        let s = session(SessionKind::Race);
        let points = pace(&s, "NOR", &PaceFilter::default()).unwrap();
        assert_eq!(points.len(), 2);
        assert!(pace(&s, "HAM", &PaceFilter::default()).is_err());
    }
}
