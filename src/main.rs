use clap::Parser;
use supplement_scribe::core::referral::{self, ReferralLinks, ReferralTracker};
use supplement_scribe::core::testing::{resolve, test_customer_email};
use supplement_scribe::core::ConfigProvider;
use supplement_scribe::server::{self, State};
use supplement_scribe::utils::error::{ErrorSeverity, ScribeError};
use supplement_scribe::utils::logger;
use supplement_scribe::utils::validation::validate_non_empty_string;
use supplement_scribe::{Cli, Command, EnvironmentSignals, FileStore, SiteConfig};
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Serve { json_logs } => logger::init_server_logger(*json_logs),
        _ => logger::init_cli_logger(cli.verbose),
    }

    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    match run(cli).await {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

/// Runs one command and returns the process exit code.
async fn run(cli: Cli) -> Result<i32, ScribeError> {
    let config = SiteConfig::load(cli.config.as_deref())?;
    let links = ReferralLinks::from_config(&config);

    match cli.command {
        Command::Generate { count } => {
            for _ in 0..count {
                let code = referral::generate();
                println!("{}\t{}", code, links.short_url(code.as_str()));
            }
        }
        Command::Validate { code } => {
            if referral::is_valid(&code) {
                println!("✅ {} is a valid referral code", code);
            } else {
                println!("❌ {} is not a valid referral code", code);
                return Ok(1);
            }
        }
        Command::Links { code } => {
            if !referral::is_valid(&code) {
                tracing::warn!("{} is not a valid referral code", code);
            }
            println!("short:  {}", links.short_url(&code));
            println!("signup: {}", links.signup_url(&code));
        }
        Command::Extract { url } => {
            let page = Url::parse(&url).map_err(|e| ScribeError::InvalidConfigValueError {
                field: "url".to_string(),
                value: url.clone(),
                reason: format!("Invalid URL format: {}", e),
            })?;
            let tracker: ReferralTracker<FileStore> = ReferralTracker::new(Some(page), None);
            match tracker.extract_from_environment() {
                Some(code) => println!("{}", code),
                None => {
                    println!("No valid referral code in {}", url);
                    return Ok(1);
                }
            }
        }
        Command::Remember { code } => {
            if !referral::is_valid(&code) {
                return Err(ScribeError::InvalidReferralCode { value: code });
            }
            pending_tracker(&config).store(&code);
            println!("Remembered {}", code);
        }
        Command::Pending => match pending_tracker(&config).retrieve_stored() {
            Some(code) => println!("{}", code),
            None => {
                println!("No pending referral code");
                return Ok(1);
            }
        },
        Command::Forget => {
            pending_tracker(&config).clear_stored();
            println!("Pending referral code cleared");
        }
        Command::TestingConfig { user_id } => {
            let testing = resolve(&EnvironmentSignals::from_env());
            println!("{}", serde_json::to_string_pretty(&testing)?);
            if let Some(user_id) = user_id {
                validate_non_empty_string("user_id", &user_id)?;
                println!("customer email: {}", test_customer_email(&user_id, &testing));
            }
        }
        Command::Serve { .. } => {
            let signals = EnvironmentSignals::from_env();
            let state = State::new(config, &signals);
            tracing::info!(
                "Starting server for {} ({} environment, test mode: {})",
                state.links.base_url(),
                state.testing.environment,
                state.testing.test_mode
            );
            server::start_server(state).await?;
        }
    }

    Ok(0)
}

fn pending_tracker(config: &SiteConfig) -> ReferralTracker<FileStore> {
    ReferralTracker::with_storage(FileStore::new(config.storage_path()))
}
