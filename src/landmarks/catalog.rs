use std::collections::HashMap;

use log::debug;

use super::types::{Landmark, LandmarkSet, ZoomRange};

/// Corner distances (m) for courses known without any configuration.
const BUILTIN_COURSES: &[(&str, &[(&str, f64)])] = &[(
    "Spain",
    &[
        ("T1", 650.0),
        ("T3", 1200.0),
        ("T4", 1550.0),
        ("T5", 1850.0),
        ("T7", 2500.0),
        ("T9", 2950.0),
        ("T10", 3300.0),
        ("T12", 3900.0),
        ("T14", 4550.0),
    ],
)];

/// Landmark sets keyed by course identity. Course names match
/// case-insensitively, like driver codes.
#[derive(Debug, Clone, Default)]
pub struct LandmarkCatalog {
    /// Lowercased name to (name as registered, landmarks).
    courses: HashMap<String, (String, LandmarkSet)>,
}

impl LandmarkCatalog {
    pub fn builtin() -> Self {
        Self::default().with_courses(BUILTIN_COURSES.iter().map(|(course, corners)| {
            (
                course.to_string(),
                LandmarkSet::from_pairs(corners.iter().copied()),
            )
        }))
    }

    /// Add courses, replacing any set already registered under the same name.
    pub fn with_courses(mut self, courses: impl IntoIterator<Item = (String, LandmarkSet)>) -> Self {
        self.courses.extend(
            courses
                .into_iter()
                .map(|(name, set)| (name.to_lowercase(), (name, set))),
        );
        self
    }

    pub fn get(&self, course: &str) -> Option<&LandmarkSet> {
        self.courses.get(&course.to_lowercase()).map(|(_, set)| set)
    }

    pub fn courses(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.courses.values().map(|(name, _)| name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Landmarks of `course` inside `zoom`. Unknown courses yield nothing.
    pub fn annotate(&self, course: &str, zoom: Option<ZoomRange>) -> Vec<Landmark> {
        match self.get(course) {
            Some(set) => set.annotate(zoom),
            None => {
                debug!("No landmarks registered for course '{}'", course);
                Vec::new()
            }
        }
    }
}
