use anyhow::Result;
use supplement_scribe::core::referral::{self, REFERRAL_STORAGE_KEY};
use supplement_scribe::core::testing::{resolve, test_customer_email};
use supplement_scribe::core::KeyValueStore;
use supplement_scribe::utils::validation::Validate;
use supplement_scribe::{
    Environment, EnvironmentSignals, FileStore, ReferralLinks, ReferralTracker, SiteConfig,
    TomlConfig,
};
use tempfile::TempDir;
use url::Url;

/// Visitor lands on a share link, the code is remembered on disk, and a later
/// session (a new store instance) still sees it until signup clears it.
#[test]
fn test_pending_referral_survives_sessions() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("storage.json");

    let landing = Url::parse("https://supplementscribe.ai/auth/signup?ref=SUPPQ7X2")?;
    let first_visit = ReferralTracker::new(Some(landing), Some(FileStore::new(&path)));
    let captured = first_visit.capture();
    assert_eq!(captured.as_ref().map(|c| c.as_str()), Some("SUPPQ7X2"));

    let later = ReferralTracker::with_storage(FileStore::new(&path));
    assert_eq!(later.retrieve_stored(), captured);

    later.clear_stored();
    assert_eq!(later.retrieve_stored(), None);
    assert_eq!(FileStore::new(&path).get(REFERRAL_STORAGE_KEY)?, None);

    Ok(())
}

#[test]
fn test_invalid_landing_code_is_not_persisted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("storage.json");

    let landing = Url::parse("https://supplementscribe.ai/?ref=bad")?;
    let tracker = ReferralTracker::new(Some(landing), Some(FileStore::new(&path)));
    assert_eq!(tracker.capture(), None);

    tracker.store("invalid");
    assert_eq!(tracker.retrieve_stored(), None);
    assert!(!path.exists());

    Ok(())
}

#[test]
fn test_links_follow_configured_site() -> Result<()> {
    let file = TomlConfig::from_toml_str("[site]\nurl = \"https://staging.supplementscribe.ai/\"\n")?;
    let config = SiteConfig::default().with_overrides(&file);
    config.validate()?;

    let links = ReferralLinks::from_config(&config);
    let code = referral::generate();
    assert_eq!(
        links.short_url(code.as_str()),
        format!("https://staging.supplementscribe.ai/s/{}", code)
    );
    assert_eq!(
        links.signup_url(code.as_str()),
        format!("https://staging.supplementscribe.ai/auth/signup?ref={}", code)
    );

    Ok(())
}

#[test]
fn test_site_config_file_overrides() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("scribe.toml");
    std::fs::write(
        &config_path,
        "[server]\nbind_address = \"127.0.0.1:4000\"\n\n[storage]\npath = \"/tmp/pending.json\"\n",
    )?;

    let file = TomlConfig::from_file(&config_path)?;
    let config = SiteConfig::default().with_overrides(&file);
    assert_eq!(config.site_url, "https://supplementscribe.ai");
    assert_eq!(config.bind_address, "127.0.0.1:4000");
    assert_eq!(config.storage_path, "/tmp/pending.json");

    Ok(())
}

#[test]
fn test_testing_flags_from_environment_lookup() {
    let vars = [("NODE_ENV", "staging"), ("USE_TEST_CUSTOMERS", "true")];
    let signals = EnvironmentSignals::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    });

    let config = resolve(&signals);
    assert_eq!(config.environment, Environment::Staging);
    assert!(config.use_test_customers);
    assert!(!config.skip_payments);
    assert!(!config.test_mode);
    assert_eq!(
        test_customer_email("abc", &config),
        "test-abc@supplementscribe.ai"
    );
}
