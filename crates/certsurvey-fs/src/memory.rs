use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::anyhow;

use crate::traits::FileSystem;

/// In-memory filesystem for tests. Paths are matched verbatim.
#[derive(Default)]
pub struct InMemoryFileSystem {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    files: HashMap<PathBuf, Vec<u8>>,
    unreadable: HashSet<PathBuf>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_file(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        let mut inner = self.inner.lock().unwrap();
        inner.files.insert(path.into(), bytes.into());
    }

    pub fn write_file_string(&self, path: impl Into<PathBuf>, s: &str) {
        self.write_file(path, s.as_bytes().to_vec());
    }

    pub fn remove(&self, path: &Path) {
        let mut inner = self.inner.lock().unwrap();
        inner.files.remove(path);
        inner.unreadable.remove(path);
    }

    /// File keeps existing but every read fails, like a permission error.
    pub fn set_unreadable(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.lock().unwrap();
        inner.unreadable.insert(path.into());
    }
}

impl FileSystem for InMemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.files.contains_key(path)
    }

    fn read_file(&self, path: &Path) -> anyhow::Result<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        if inner.unreadable.contains(path) {
            return Err(anyhow!("read {}: permission denied", path.display()));
        }
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("read {}: no such file", path.display()))
    }
}
