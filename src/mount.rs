// src/mount.rs
// Resolving command line items into mountable files and directories

use crate::error::ServeError;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKind {
    File,
    Directory,
}

/// A filesystem target that exists and has been made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    pub kind: MountKind,
}

impl Target {
    /// Resolve `item` against the current working directory and stat it.
    pub fn resolve(item: impl AsRef<Path>) -> Result<Self, ServeError> {
        let item = item.as_ref();
        let cwd = env::current_dir().map_err(|source| ServeError::Resolve {
            path: item.to_path_buf(),
            source,
        })?;
        Self::resolve_from(&cwd, item)
    }

    pub fn resolve_from(base: &Path, item: &Path) -> Result<Self, ServeError> {
        let path = absolutize(base, item);
        let metadata = fs::metadata(&path).map_err(|source| ServeError::Resolve {
            path: path.clone(),
            source,
        })?;

        let kind = if metadata.is_dir() {
            MountKind::Directory
        } else {
            MountKind::File
        };

        Ok(Self { path, kind })
    }

    /// `/` followed by the base name, or just `/` for the filesystem root.
    pub fn default_pattern(&self) -> String {
        match self.path.file_name() {
            Some(name) => format!("/{}", name.to_string_lossy()),
            None => "/".to_string(),
        }
    }

    pub fn into_mount(self, pattern: &str) -> Mount {
        let pattern = normalize_pattern(pattern, self.kind);
        Mount {
            pattern,
            target: self.path,
            kind: self.kind,
        }
    }
}

/// The association between a URL pattern and a filesystem target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub pattern: String,
    pub target: PathBuf,
    pub kind: MountKind,
}

impl Mount {
    /// Patterns ending in `/` match every path below them.
    pub fn is_prefix(&self) -> bool {
        self.pattern.ends_with('/')
    }
}

/// Enforce the leading slash, and the trailing slash for directories.
pub fn normalize_pattern(pattern: &str, kind: MountKind) -> String {
    let mut pattern = if pattern.starts_with('/') {
        pattern.to_string()
    } else {
        format!("/{}", pattern)
    };

    if kind == MountKind::Directory && !pattern.ends_with('/') {
        pattern.push('/');
    }

    pattern
}

/// Join `item` onto `base` when relative and drop `.`/`..` lexically.
/// Symlinks are left untouched.
fn absolutize(base: &Path, item: &Path) -> PathBuf {
    let joined = if item.is_absolute() {
        item.to_path_buf()
    } else {
        base.join(item)
    };

    let mut cleaned = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }

    cleaned
}
