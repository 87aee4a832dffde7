//! File system testing utilities
//!
//! A temporary tree of files and directories to hand to the server.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// Temporary directory holding the items a test serves
pub struct TestSite {
    pub temp_dir: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        TestSite {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file, creating parent directories as needed
    pub fn file(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let filepath = self.root().join(relative);
        if let Some(parent) = filepath.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&filepath, contents).expect("Failed to write test file");
        filepath
    }

    pub fn dir(&self, relative: &str) -> PathBuf {
        let dirpath = self.root().join(relative);
        std::fs::create_dir_all(&dirpath).expect("Failed to create test directory");
        dirpath
    }

    /// Write a serve.json style configuration file
    pub fn config(&self, relative: &str, config: &Value) -> PathBuf {
        let content = serde_json::to_string_pretty(config).expect("Failed to encode config");
        self.file(relative, content)
    }

    /// A directory with an index page, a nested file and a sibling secret
    pub fn public_dir(&self) -> PathBuf {
        self.file("public/index.html", "<h1>Welcome</h1>");
        self.file("public/sub/file.txt", "nested file");
        self.file("outside.txt", "secret");
        self.root().join("public")
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}
