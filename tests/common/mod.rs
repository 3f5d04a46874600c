#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use homeowner_api::{app, config::AppConfig, AppState};
use reqwest::StatusCode;

pub const API_KEY: &str = "integration-test-key";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the real router over the MySQL store on a free local port. The
    /// server task lives on the calling test's runtime.
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::from_env();
        config.api_key = Some(API_KEY.to_string());
        config.port = port;
        let state = AppState::mysql(config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path)).header("X-API-KEY", API_KEY)
    }

    pub fn post(&self, path: &str, body: &serde_json::Value) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .header("X-API-KEY", API_KEY)
            .json(body)
    }
}

/// Database-backed tests only run when a MySQL host is configured
pub fn database_configured() -> bool {
    match std::env::var("MYSQLHOST") {
        Ok(host) if !host.trim().is_empty() => true,
        _ => {
            eprintln!("MYSQLHOST not set; skipping database-backed test");
            false
        }
    }
}
