pub mod entry;
pub mod error;
pub mod logging;
pub mod repository;
pub mod source;

pub use entry::ConfigEntry;
pub use error::{Error, Result};
pub use repository::{ConfigMap, ConfigRepository};
pub use source::{FileSourceEvaluator, SourceEvaluator, Sources};
