//! HTTP client testing utilities
//!
//! This module provides the TestClient struct used to probe a running server.

use std::time::Duration;

use reqwest::{Client, Response};

/// HTTP testing client wrapper
pub struct TestClient {
    pub client: Client,
}

impl TestClient {
    /// Create a new test client
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        TestClient { client }
    }

    /// Perform a GET request
    pub async fn get(&self, url: &str) -> Result<Response, Box<dyn std::error::Error>> {
        let response = self.client.get(url).send().await?;
        Ok(response)
    }

    /// Perform a GET request for a byte range
    pub async fn get_range(
        &self,
        url: &str,
        range: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let response = self
            .client
            .get(url)
            .header("Range", format!("bytes={}", range))
            .send()
            .await?;
        Ok(response)
    }

    /// Perform a HEAD request
    pub async fn head(&self, url: &str) -> Result<Response, Box<dyn std::error::Error>> {
        let response = self.client.head(url).send().await?;
        Ok(response)
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
