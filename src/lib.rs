pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonStore, LettreMailer, StoreReportFactory};
pub use config::{ArgumentSet, TomlConfig};
pub use crate::core::summary::SummaryJob;
pub use utils::error::{ChainFormatter, Result, SummaryError};
