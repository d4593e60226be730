pub mod metrics;
pub mod providers;
pub mod text;

pub use text::{TextService, TextServiceError};
