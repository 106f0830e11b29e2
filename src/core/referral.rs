use crate::domain::model::{is_valid_referral_code, ReferralCode, REFERRAL_PREFIX};
use crate::domain::ports::{ConfigProvider, KeyValueStore};
use crate::utils::error::{Result, ScribeError};
use rand::Rng;
use url::Url;

pub const DEFAULT_SITE_URL: &str = "https://supplementscribe.ai";
pub const REFERRAL_STORAGE_KEY: &str = "referral_code";
pub const REFERRAL_QUERY_PARAM: &str = "ref";
pub const SIGNUP_PATH: &str = "/auth/signup";

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 4;

/// Random, not cryptographically secure, and not checked for uniqueness.
pub fn generate() -> ReferralCode {
    generate_with(&mut rand::rng())
}

pub fn generate_with<R: Rng>(rng: &mut R) -> ReferralCode {
    let mut code = String::with_capacity(REFERRAL_PREFIX.len() + SUFFIX_LEN);
    code.push_str(REFERRAL_PREFIX);
    for _ in 0..SUFFIX_LEN {
        let idx = rng.random_range(0..ALPHABET.len());
        code.push(char::from(ALPHABET[idx]));
    }
    ReferralCode::from_generated(code)
}

/// Regenerates until `is_taken` rejects a candidate or `max_attempts` runs out.
pub fn generate_unique<F>(mut is_taken: F, max_attempts: usize) -> Result<ReferralCode>
where
    F: FnMut(&ReferralCode) -> bool,
{
    let mut rng = rand::rng();
    for attempt in 1..=max_attempts {
        let candidate = generate_with(&mut rng);
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!("Referral code {} already taken (attempt {})", candidate, attempt);
    }

    Err(ScribeError::ReferralCodeExhausted {
        attempts: max_attempts,
    })
}

pub fn is_valid(code: &str) -> bool {
    is_valid_referral_code(code)
}

/// Where the `/s/{code}` endpoint sends the browser.
pub fn redirect_target(code: &str) -> String {
    if is_valid(code) {
        format!("{}?{}={}", SIGNUP_PATH, REFERRAL_QUERY_PARAM, code)
    } else {
        SIGNUP_PATH.to_string()
    }
}

/// Reads the `ref` query parameter of `url`, keeping it only when valid.
pub fn extract_from_url(url: &Url) -> Option<ReferralCode> {
    url.query_pairs()
        .find(|(key, _)| key == REFERRAL_QUERY_PARAM)
        .and_then(|(_, value)| ReferralCode::parse(&value))
}

/// Builds shareable links against the site origin. Codes are not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralLinks {
    base_url: String,
}

impl ReferralLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_SITE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.site_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn short_url(&self, code: &str) -> String {
        format!("{}/s/{}", self.base_url, code)
    }

    pub fn signup_url(&self, code: &str) -> String {
        format!(
            "{}{}?{}={}",
            self.base_url, SIGNUP_PATH, REFERRAL_QUERY_PARAM, code
        )
    }
}

impl Default for ReferralLinks {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_URL)
    }
}

/// Client-side view of a pending referral: the page the visitor landed on and
/// the persistent slot it is remembered in until signup.
///
/// Either half may be missing (server-side rendering has neither); every
/// operation then degrades to a no-op instead of failing.
#[derive(Debug, Clone)]
pub struct ReferralTracker<S: KeyValueStore> {
    location: Option<Url>,
    storage: Option<S>,
}

impl<S: KeyValueStore> ReferralTracker<S> {
    pub fn new(location: Option<Url>, storage: Option<S>) -> Self {
        Self { location, storage }
    }

    /// No page and no storage.
    pub fn detached() -> Self {
        Self::new(None, None)
    }

    pub fn with_storage(storage: S) -> Self {
        Self::new(None, Some(storage))
    }

    pub fn extract_from_environment(&self) -> Option<ReferralCode> {
        self.location.as_ref().and_then(extract_from_url)
    }

    pub fn store(&self, code: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if !is_valid(code) {
            tracing::debug!("Ignoring invalid referral code {:?}", code);
            return;
        }
        if let Err(e) = storage.set(REFERRAL_STORAGE_KEY, code) {
            tracing::warn!("Failed to store referral code: {}", e);
        }
    }

    pub fn retrieve_stored(&self) -> Option<ReferralCode> {
        let storage = self.storage.as_ref()?;
        match storage.get(REFERRAL_STORAGE_KEY) {
            Ok(value) => value.and_then(|v| ReferralCode::parse(&v)),
            Err(e) => {
                tracing::warn!("Failed to read stored referral code: {}", e);
                None
            }
        }
    }

    pub fn clear_stored(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.remove(REFERRAL_STORAGE_KEY) {
            tracing::warn!("Failed to clear stored referral code: {}", e);
        }
    }

    /// Stores the code carried by the current page, if any, and returns it.
    pub fn capture(&self) -> Option<ReferralCode> {
        let code = self.extract_from_environment()?;
        self.store(code.as_str());
        Some(code)
    }
}
