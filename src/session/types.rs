use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::landmarks::LandmarkSet;
use crate::laps::{DriverLaps, SessionKind};
use crate::session::ProviderError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub year: u16,
    pub event: String,
    pub kind: SessionKind,
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.event, self.kind)
    }
}

/// Everything recorded for one session: laps with telemetry for every driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub year: u16,
    pub event: String,
    pub kind: SessionKind,
    /// Course identity used for landmark lookup; defaults to the event name.
    #[serde(default)]
    pub course: Option<String>,
    /// Corner distances shipped with the session, preferred over the catalog.
    #[serde(default)]
    pub corners: Option<LandmarkSet>,
    #[serde(default)]
    pub drivers: Vec<DriverLaps>,
}

impl Session {
    pub fn from_yaml(content: &str) -> Result<Self, ProviderError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, ProviderError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse by extension: `.json` as JSON, anything else as YAML.
    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    pub fn key(&self) -> SessionKey {
        SessionKey {
            year: self.year,
            event: self.event.clone(),
            kind: self.kind,
        }
    }

    pub fn course(&self) -> &str {
        self.course.as_deref().unwrap_or(&self.event)
    }

    /// Driver codes compare case-insensitively.
    pub fn driver(&self, code: &str) -> Option<&DriverLaps> {
        self.drivers
            .iter()
            .find(|d| d.driver.eq_ignore_ascii_case(code))
    }
}
