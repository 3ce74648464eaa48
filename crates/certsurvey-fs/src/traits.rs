use std::path::Path;

use anyhow::Context;

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read_file(&self, path: &Path) -> anyhow::Result<Vec<u8>>;

    fn read_file_string(&self, path: &Path) -> anyhow::Result<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).with_context(|| format!("{} is not utf-8", path.display()))
    }
}
