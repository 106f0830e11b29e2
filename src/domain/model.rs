use crate::utils::error::ScribeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const REFERRAL_PREFIX: &str = "SUPP";

static REFERRAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SUPP[A-Z0-9]{4}$").expect("referral pattern compiles"));

/// `true` iff `code` is exactly `SUPP` followed by four of `A-Z0-9`.
pub fn is_valid_referral_code(code: &str) -> bool {
    REFERRAL_PATTERN.is_match(code)
}

/// A referral code that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferralCode(String);

impl ReferralCode {
    pub fn parse(code: &str) -> Option<Self> {
        is_valid_referral_code(code).then(|| Self(code.to_string()))
    }

    /// Caller guarantees `code` matches the referral pattern.
    pub(crate) fn from_generated(code: String) -> Self {
        debug_assert!(is_valid_referral_code(&code));
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReferralCode {
    type Error = ScribeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_referral_code(&value) {
            Ok(Self(value))
        } else {
            Err(ScribeError::InvalidReferralCode { value })
        }
    }
}

impl From<ReferralCode> for String {
    fn from(code: ReferralCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ReferralCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Unknown or empty names fall back to development.
    pub fn from_name(name: &str) -> Self {
        match name {
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw inputs to the testing configuration, as read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSignals {
    pub node_env: String,
    pub testing_mode_flag: bool,
    pub skip_payments_flag: bool,
    pub skip_order_creation_flag: bool,
    pub use_test_customers_flag: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestingConfig {
    pub skip_payments: bool,
    pub skip_order_creation: bool,
    pub use_test_customers: bool,
    pub test_mode: bool,
    pub environment: Environment,
}
