use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive distance window used to focus a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl ZoomRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, distance: f64) -> bool {
        self.min <= distance && distance <= self.max
    }
}

impl FromStr for ZoomRange {
    type Err = String;

    /// Accepts `MIN..MAX` or `MIN,MAX`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once("..")
            .or_else(|| s.split_once(','))
            .ok_or_else(|| format!("expected MIN..MAX, got '{}'", s))?;
        let min: f64 = min.trim().parse().map_err(|e| format!("invalid min: {}", e))?;
        let max: f64 = max.trim().parse().map_err(|e| format!("invalid max: {}", e))?;
        if min > max {
            return Err(format!("zoom min {} is greater than max {}", min, max));
        }
        Ok(Self { min, max })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Landmark {
    pub name: String,
    pub distance: f64,
}

/// Named distance markers (usually corners) of one course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    markers: BTreeMap<String, f64>,
}

impl LandmarkSet {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            markers: pairs
                .into_iter()
                .map(|(name, distance)| (name.to_string(), distance))
                .collect(),
        }
    }

    /// Landmarks inside `zoom` (all of them without one), ordered by distance.
    pub fn annotate(&self, zoom: Option<ZoomRange>) -> Vec<Landmark> {
        let mut landmarks: Vec<Landmark> = self
            .markers
            .iter()
            .filter(|(_, &distance)| zoom.map_or(true, |z| z.contains(distance)))
            .map(|(name, &distance)| Landmark {
                name: name.clone(),
                distance,
            })
            .collect();

        landmarks.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.name.cmp(&b.name))
        });
        landmarks
    }
}
