// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Link code storage adapters.
//!
//! | Store | Lifetime |
//! |-------|----------|
//! | [`InMemoryLinkCodeStore`] | the current process |
//! | [`SessionFileLinkCodeStore`] | the user's login session (runtime dir) |

use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::link::{LinkCode, LinkCodeStore, LINK_CODE_STORAGE_KEY};

#[derive(Debug, Default)]
pub struct InMemoryLinkCodeStore {
    code: Mutex<Option<LinkCode>>,
}

impl InMemoryLinkCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(code: LinkCode) -> Self {
        Self {
            code: Mutex::new(Some(code)),
        }
    }
}

impl LinkCodeStore for InMemoryLinkCodeStore {
    fn load(&self) -> Option<LinkCode> {
        self.code.lock().clone()
    }

    fn save(&self, code: &LinkCode) -> std::io::Result<()> {
        *self.code.lock() = Some(code.clone());
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        *self.code.lock() = None;
        Ok(())
    }
}

/// Keeps the code in a file named after [`LINK_CODE_STORAGE_KEY`] inside a
/// session-scoped directory. `$XDG_RUNTIME_DIR` is removed by the system
/// when the user logs out, which gives the same lifetime as browser session
/// storage.
#[derive(Debug, Clone)]
pub struct SessionFileLinkCodeStore {
    path: PathBuf,
}

impl SessionFileLinkCodeStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(LINK_CODE_STORAGE_KEY),
        }
    }

    /// `$XDG_RUNTIME_DIR/laissez`, or the temp dir where there is no
    /// runtime dir.
    pub fn default_dir() -> PathBuf {
        dirs::runtime_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("laissez")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LinkCodeStore for SessionFileLinkCodeStore {
    fn load(&self) -> Option<LinkCode> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => LinkCode::parse(&content),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    debug!("Could not read stored link code at {:?}: {}", self.path, e);
                }
                None
            }
        }
    }

    fn save(&self, code: &LinkCode) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, code.as_str())
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> LinkCode {
        LinkCode::parse(raw).unwrap()
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryLinkCodeStore::new();
        assert_eq!(store.load(), None);

        store.save(&code("abc")).unwrap();
        assert_eq!(store.load(), Some(code("abc")));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let session_dir = dir.path().join("laissez");

        let first = SessionFileLinkCodeStore::new(&session_dir);
        assert_eq!(first.load(), None);
        first.save(&code("tg-77")).unwrap();
        assert!(first.path().ends_with(LINK_CODE_STORAGE_KEY));

        let second = SessionFileLinkCodeStore::new(&session_dir);
        assert_eq!(second.load(), Some(code("tg-77")));

        second.clear().unwrap();
        assert_eq!(first.load(), None);
        // clearing twice is fine
        second.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionFileLinkCodeStore::new(dir.path());
        std::fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load(), None);
    }
}
