pub mod referral;
pub mod testing;

pub use crate::domain::model::{
    Environment, EnvironmentSignals, ReferralCode, TestingConfig,
};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore};
pub use crate::utils::error::Result;
