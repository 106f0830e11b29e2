pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{Cli, Command};

pub use crate::adapters::storage::{FileStore, MemoryStore};
pub use crate::config::{SiteConfig, TomlConfig};
pub use crate::core::referral::{ReferralLinks, ReferralTracker};
pub use crate::core::{Environment, EnvironmentSignals, ReferralCode, TestingConfig};
pub use crate::utils::error::{Result, ScribeError};
