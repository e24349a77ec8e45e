pub mod compare;
pub mod error;
pub mod landmarks;
pub mod pace;
