//! Test server management utilities
//!
//! Starts the serve binary, answers its prompts through stdin and tears it
//! down again when the test is done.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::time::{sleep, timeout};

use super::network::NetworkTestHelper;

/// Path of the binary under test
pub fn serve_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_serve"))
}

/// Run the binary to completion, feeding `answers` to its prompts.
///
/// Only suitable for invocations that exit on their own.
pub fn run_to_completion(
    args: &[String],
    answers: &str,
    current_dir: &Path,
) -> Result<Output, Box<dyn std::error::Error>> {
    let mut process = Command::new(serve_binary())
        .args(args)
        .current_dir(current_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = process.stdin.take() {
        // The process may already have exited; its output tells the story
        let _ = stdin.write_all(answers.as_bytes());
    }

    Ok(process.wait_with_output()?)
}

/// Test server configuration and lifecycle management
pub struct TestServer {
    pub process: Child,
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    /// Serve `items`, answering the prompts with `answers` (one line per item)
    pub async fn start(
        items: &[&Path],
        answers: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Self::start_with_args(items, answers, Vec::new()).await
    }

    /// Serve `items` with extra command line flags
    pub async fn start_with_args(
        items: &[&Path],
        answers: &str,
        extra_args: Vec<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let port = NetworkTestHelper::next_port()?;

        let mut args = vec!["-port".to_string(), port.to_string()];
        args.extend(extra_args);
        args.extend(items.iter().map(|item| item.to_string_lossy().to_string()));

        let mut process = Command::new(serve_binary())
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Dropping stdin after the answers makes any further prompt use its default
        if let Some(mut stdin) = process.stdin.take() {
            let _ = stdin.write_all(answers.as_bytes());
        }

        let base_url = format!("http://127.0.0.1:{}", port);
        let mut server = TestServer {
            process,
            port,
            base_url,
        };
        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Get the server's base URL
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Get a URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        format!("{}{}", self.base_url, path)
    }

    /// Poll the process until it exits or `limit` elapses
    pub async fn wait_for_exit(&mut self, limit: Duration) -> Option<ExitStatus> {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if let Ok(Some(status)) = self.process.try_wait() {
                return Some(status);
            }
            sleep(Duration::from_millis(50)).await;
        }
        None
    }

    pub fn is_running(&mut self) -> bool {
        matches!(self.process.try_wait(), Ok(None))
    }

    /// Everything printed to stdout; only call once the process has exited
    pub fn stdout_text(&mut self) -> String {
        let mut text = String::new();
        if let Some(mut stdout) = self.process.stdout.take() {
            let _ = stdout.read_to_string(&mut text);
        }
        text
    }

    /// Stop the server
    pub fn stop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.is_running() {
            self.process.kill()?;
        }
        self.process.wait()?;
        Ok(())
    }

    async fn wait_until_ready(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let client = Client::new();
        let max_attempts = 50;
        let delay = Duration::from_millis(100);

        for _ in 0..max_attempts {
            if let Some(status) = self.process.try_wait()? {
                let output = self.stdout_text();
                return Err(format!("serve exited early with {}:\n{}", status, output).into());
            }

            match timeout(Duration::from_secs(5), client.get(&self.base_url).send()).await {
                Ok(Ok(_)) => return Ok(()),
                _ => sleep(delay).await,
            }
        }

        Err(format!("Server at {} did not become ready in time", self.base_url).into())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
