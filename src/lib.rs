pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod processing;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{HttpUploader, PageState};
pub use config::UploaderConfig;
pub use crate::core::controller::{Subscription, UploadController};
pub use crate::core::notifier::Notifier;
pub use domain::model::{FormData, SubmitOutcome, UploadSettings};
pub use processing::Screener;
pub use utils::error::{Result, UploaderError};
