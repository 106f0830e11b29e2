use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "supplement-scribe")]
#[command(about = "Referral codes and testing flags for SupplementScribe")]
pub struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate new referral codes
    Generate {
        #[arg(long, default_value = "1")]
        count: usize,
    },
    /// Check whether a referral code is well formed
    Validate { code: String },
    /// Print the share links for a code
    Links { code: String },
    /// Pull the referral code out of a page URL
    Extract { url: String },
    /// Remember a pending referral code
    Remember { code: String },
    /// Show the pending referral code
    Pending,
    /// Forget the pending referral code
    Forget,
    /// Show the testing flags resolved from the environment
    TestingConfig {
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Run the HTTP server
    Serve {
        #[arg(long, help = "Log as JSON lines")]
        json_logs: bool,
    },
}
