use anyhow::Result;
use reqwest::{redirect::Policy, StatusCode};
use std::net::SocketAddr;
use supplement_scribe::server::{self, State};
use supplement_scribe::{EnvironmentSignals, SiteConfig};
use tokio::sync::oneshot;

struct TestServer {
    address: SocketAddr,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<supplement_scribe::Result<()>>,
}

impl TestServer {
    async fn start(signals: EnvironmentSignals) -> Result<Self> {
        let config = SiteConfig {
            site_url: "https://supplementscribe.ai".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            storage_path: "./unused.json".to_string(),
        };
        let state = State::new(config, &signals);

        let listener = server::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server::serve_with_shutdown(listener, state, async move {
            let _ = rx.await;
        }));

        let client = reqwest::Client::builder().redirect(Policy::none()).build()?;

        Ok(Self {
            address,
            client,
            shutdown: Some(tx),
            handle,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    async fn stop(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await??;
        Ok(())
    }
}

fn production() -> EnvironmentSignals {
    EnvironmentSignals {
        node_env: "production".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_short_link_redirects_valid_code_to_signup() -> Result<()> {
    let server = TestServer::start(production()).await?;

    let response = server.client.get(server.url("/s/SUPP1A2B")).send().await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()["location"].to_str()?,
        "/auth/signup?ref=SUPP1A2B"
    );

    server.stop().await
}

#[tokio::test]
async fn test_short_link_drops_invalid_code() -> Result<()> {
    let server = TestServer::start(production()).await?;

    for path in ["/s/bad", "/s/supp1a2b", "/s/SUPP1A2BC"] {
        let response = server.client.get(server.url(path)).send().await?;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"].to_str()?, "/auth/signup");
    }

    server.stop().await
}

#[tokio::test]
async fn test_referral_links_endpoint() -> Result<()> {
    let server = TestServer::start(production()).await?;

    let response = server
        .client
        .get(server.url("/api/referral/SUPP1A2B"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["code"], "SUPP1A2B");
    assert_eq!(body["valid"], true);
    assert_eq!(body["short_url"], "https://supplementscribe.ai/s/SUPP1A2B");
    assert_eq!(
        body["signup_url"],
        "https://supplementscribe.ai/auth/signup?ref=SUPP1A2B"
    );

    server.stop().await
}

#[tokio::test]
async fn test_referral_links_endpoint_rejects_invalid_code() -> Result<()> {
    let server = TestServer::start(production()).await?;

    let response = server
        .client
        .get(server.url("/api/referral/nope"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await?;
    assert!(body["error"].as_str().unwrap().contains("nope"));

    server.stop().await
}

#[tokio::test]
async fn test_generate_endpoint_returns_valid_code() -> Result<()> {
    let server = TestServer::start(production()).await?;

    let body: serde_json::Value = server
        .client
        .get(server.url("/api/referral/generate"))
        .send()
        .await?
        .json()
        .await?;

    let code = body["code"].as_str().unwrap();
    assert!(supplement_scribe::core::referral::is_valid(code));
    assert_eq!(
        body["short_url"],
        format!("https://supplementscribe.ai/s/{}", code)
    );

    server.stop().await
}

#[tokio::test]
async fn test_testing_config_endpoint() -> Result<()> {
    let server = TestServer::start(EnvironmentSignals {
        testing_mode_flag: true,
        ..production()
    })
    .await?;

    let body: serde_json::Value = server
        .client
        .get(server.url("/api/testing-config"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(
        body,
        serde_json::json!({
            "skip_payments": true,
            "skip_order_creation": false,
            "use_test_customers": true,
            "test_mode": true,
            "environment": "production"
        })
    );

    server.stop().await
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let server = TestServer::start(production()).await?;

    let response = server.client.get(server.url("/health")).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "ok");

    server.stop().await
}
