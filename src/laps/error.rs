use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LapError {
    #[error("no data for {driver}: {}", describe(.lap))]
    NoLapFound { driver: String, lap: Option<u32> },
}

fn describe(lap: &Option<u32>) -> String {
    match lap {
        Some(n) => format!("lap {} not recorded", n),
        None => "no timed laps".to_string(),
    }
}
