mod error;
mod provider;
mod types;

pub use error::ProviderError;
pub use provider::{FileSessionProvider, SessionProvider};
pub use types::{Session, SessionKey};
