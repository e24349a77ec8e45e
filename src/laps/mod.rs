mod error;
mod pace;
mod sectors;
mod selection;
mod types;

pub use error::LapError;
pub use pace::{race_pace, PaceFilter, PacePoint};
pub use sectors::{compare_sectors, SectorDelta};
pub use selection::select_lap;
pub use types::{DriverLaps, Lap, LapSummary, SessionKind};
