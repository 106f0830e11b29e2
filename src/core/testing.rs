use crate::domain::model::{Environment, EnvironmentSignals, TestingConfig};

pub const CUSTOMER_EMAIL_DOMAIN: &str = "supplementscribe.ai";

/// Derives the testing flags that gate live payments and order creation.
///
/// Testing mode implies skipped payments and test customers; a development
/// environment implies test mode on its own.
pub fn resolve(signals: &EnvironmentSignals) -> TestingConfig {
    let is_development = signals.node_env == "development";

    TestingConfig {
        skip_payments: signals.skip_payments_flag || signals.testing_mode_flag,
        skip_order_creation: signals.skip_order_creation_flag,
        use_test_customers: signals.use_test_customers_flag || signals.testing_mode_flag,
        test_mode: signals.testing_mode_flag || is_development,
        environment: Environment::from_name(&signals.node_env),
    }
}

pub fn test_customer_email(user_id: &str, config: &TestingConfig) -> String {
    let prefix = if config.use_test_customers {
        "test"
    } else {
        "user"
    };
    format!("{}-{}@{}", prefix, user_id, CUSTOMER_EMAIL_DOMAIN)
}
