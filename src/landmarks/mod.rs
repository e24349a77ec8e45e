mod catalog;
mod types;

pub use catalog::LandmarkCatalog;
pub use types::{Landmark, LandmarkSet, ZoomRange};
