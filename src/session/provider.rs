use std::path::{Component, Path, PathBuf};

use crate::session::{ProviderError, Session, SessionKey};

const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Source of recorded sessions. Implementations hand out owned data and keep
/// no state between calls.
pub trait SessionProvider: Send + Sync {
    fn load(&self, key: &SessionKey) -> Result<Session, ProviderError>;
}

/// Reads sessions from `<base>/<year>/<event>/<KIND>.{yaml,yml,json}`.
pub struct FileSessionProvider {
    base: PathBuf,
}

impl FileSessionProvider {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// The event must name a single directory under the year folder.
    fn session_dir(&self, key: &SessionKey) -> Result<PathBuf, ProviderError> {
        let mut components = Path::new(&key.event).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(event)), None) if event == key.event.as_str() => {
                Ok(self.base.join(key.year.to_string()).join(event))
            }
            _ => Err(ProviderError::InvalidKey(key.to_string())),
        }
    }

    /// Every session file present under the base folder.
    pub fn list(&self) -> Result<Vec<PathBuf>, ProviderError> {
        if !self.base.exists() {
            return Err(ProviderError::NotFound(self.base.display().to_string()));
        }

        let mut files = Vec::new();
        for year in self.base.read_dir()? {
            let year = year?.path();
            if !year.is_dir() {
                continue;
            }
            for event in year.read_dir()? {
                let event = event?.path();
                if !event.is_dir() {
                    continue;
                }
                for entry in event.read_dir()? {
                    let path = entry?.path();
                    let known = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| EXTENSIONS.contains(&e));
                    if path.is_file() && known {
                        files.push(path);
                    }
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

impl SessionProvider for FileSessionProvider {
    fn load(&self, key: &SessionKey) -> Result<Session, ProviderError> {
        let dir = self.session_dir(key)?;

        let path = EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", key.kind, ext)))
            .find(|p| p.is_file())
            .ok_or_else(|| ProviderError::NotFound(key.to_string()))?;

        log::info!("Loading session {} from {}", key, path.display());
        let session = Session::from_file(&path)?;

        if session.key() != *key {
            log::warn!(
                "Session file {} describes {}, requested {}",
                path.display(),
                session.key(),
                key
            );
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laps::SessionKind;
    use std::fs;

    const SESSION_YAML: &str = r#"
year: 2024
event: Spain
kind: Q
drivers:
  - driver: VER
    laps:
      - lap_number: 12
        lap_time: 72.1
        sector_times: [22.0, 30.1, 20.0]
        telemetry:
          - { distance: 0, time: 3600.0, speed: 280 }
          - { distance: 50, time: 3600.6, speed: 290, brake: false }
"#;

    fn key() -> SessionKey {
        SessionKey {
            year: 2024,
            event: "Spain".into(),
            kind: SessionKind::Qualifying,
        }
    }

    #[test]
    fn test_load_yaml_session() {
        let dir = tempfile::tempdir().unwrap();
        let event_dir = dir.path().join("2024").join("Spain");
        fs::create_dir_all(&event_dir).unwrap();
        fs::write(event_dir.join("Q.yaml"), SESSION_YAML).unwrap();

        let provider = FileSessionProvider::new(dir.path().to_path_buf());
        let session = provider.load(&key()).unwrap();
        assert_eq!(session.kind, SessionKind::Qualifying);
        assert_eq!(session.course(), "Spain");

        let ver = session.driver("ver").unwrap();
        assert_eq!(ver.laps[0].telemetry.len(), 2);
        assert_eq!(ver.laps[0].telemetry[1].brake, Some(0.0));
        assert_eq!(ver.laps[0].sector_times[1], Some(30.1));

        assert_eq!(provider.list().unwrap().len(), 1);
    }

    #[test]
    fn test_load_json_session() {
        let dir = tempfile::tempdir().unwrap();
        let event_dir = dir.path().join("2023").join("Monza");
        fs::create_dir_all(&event_dir).unwrap();
        let json = r#"{"year": 2023, "event": "Monza", "kind": "R", "drivers": []}"#;
        fs::write(event_dir.join("R.json"), json).unwrap();

        let provider = FileSessionProvider::new(dir.path().to_path_buf());
        let session = provider
            .load(&SessionKey {
                year: 2023,
                event: "Monza".into(),
                kind: SessionKind::Race,
            })
            .unwrap();
        assert!(session.drivers.is_empty());
        assert!(session.kind.is_race());
    }

    #[test]
    fn test_missing_session() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileSessionProvider::new(dir.path().to_path_buf());
        let err = provider.load(&key()).unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(ref k) if k == "2024 Spain Q"));
    }

    #[test]
    fn test_event_must_stay_under_base() {
        let base = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("Q.yaml"), SESSION_YAML).unwrap();
        fs::create_dir_all(base.path().join("2024")).unwrap();

        let provider = FileSessionProvider::new(base.path().to_path_buf());
        for event in [
            outside.path().display().to_string(),
            format!("../../{}", outside.path().display()),
            "..".to_string(),
            "Spain/../..".to_string(),
            "Spain/".to_string(),
            String::new(),
        ] {
            let err = provider
                .load(&SessionKey {
                    year: 2024,
                    event: event.clone(),
                    kind: SessionKind::Qualifying,
                })
                .unwrap_err();
            assert!(matches!(err, ProviderError::InvalidKey(_)), "event {:?}", event);
        }
    }

    #[test]
    fn test_malformed_session() {
        let dir = tempfile::tempdir().unwrap();
        let event_dir = dir.path().join("2024").join("Spain");
        fs::create_dir_all(&event_dir).unwrap();
        fs::write(event_dir.join("Q.yaml"), "year: [not a number").unwrap();

        let provider = FileSessionProvider::new(dir.path().to_path_buf());
        assert!(matches!(provider.load(&key()), Err(ProviderError::Yaml(_))));
    }
}
