//! Shared test fixtures.

use std::time::Duration;

use chat_relay::config::ServerConfig;

/// A relay server running on a dedicated port for one test.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Spawn the server and wait until its health endpoint answers.
    pub async fn start(port: u16) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
            admin: "admin".to_string(),
            history_limit: 50,
        };
        tokio::spawn(async move {
            if let Err(e) = chat_relay::run(config).await {
                panic!("test server failed: {e}");
            }
        });

        let server = Self { port };
        server.wait_until_ready().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    // Not every integration target speaks WebSocket
    #[allow(dead_code)]
    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    async fn wait_until_ready(&self) {
        let client = reqwest::Client::new();
        let url = format!("{}/api/health", self.base_url());
        for _ in 0..50 {
            if let Ok(response) = client.get(&url).send().await {
                if response.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("test server on port {} never became ready", self.port);
    }
}
