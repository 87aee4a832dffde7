//! Common test utilities for serve integration tests
//!
//! This module provides shared functionality for driving the serve binary,
//! organized into focused sub-modules for better maintainability.

#![allow(dead_code)] // Each test suite uses a different subset of helpers
#![allow(unused_imports)] // Some re-exports may not be used in all test modules

pub mod client;
pub mod filesystem;
pub mod server;

// Re-export commonly used types and functions for convenience
pub use assertions::ResponseAssertions;
pub use client::TestClient;
pub use filesystem::TestSite;
pub use network::NetworkTestHelper;
pub use server::{run_to_completion, serve_binary, TestServer};

pub use serde_json::json;
