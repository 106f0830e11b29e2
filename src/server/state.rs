use std::sync::Arc;

use crate::config::SiteConfig;
use crate::core::referral::ReferralLinks;
use crate::core::testing::resolve;
use crate::core::{EnvironmentSignals, TestingConfig};

pub struct State {
    pub config: SiteConfig,
    pub links: ReferralLinks,
    pub testing: TestingConfig,
}

impl State {
    pub fn new(config: SiteConfig, signals: &EnvironmentSignals) -> Arc<Self> {
        let links = ReferralLinks::from_config(&config);
        let testing = resolve(signals);

        Arc::new(Self {
            config,
            links,
            testing,
        })
    }
}
