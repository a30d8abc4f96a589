//! File-save capability: accepts a filename and bytes, initiates a save.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// A destination that can initiate a file save.
///
/// Success means the save was initiated; filesystem completion is not
/// awaited or observed beyond the initiation result.
pub trait FileSaver: Send + Sync {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()>;
}

/// Saves into a fixed directory, creating it on demand.
pub struct DirectoryFileSaver {
    dir: PathBuf,
}

impl DirectoryFileSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target the user's download directory, falling back to the working
    /// directory when the platform exposes none.
    pub fn user_downloads() -> Self {
        let dir = directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }

    pub fn directory(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectoryFileSaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::Download(format!("create {} failed: {}", self.dir.display(), e)))?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)
            .map_err(|e| Error::Download(format!("write {} failed: {}", path.display(), e)))?;
        log::debug!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Accepts and discards every save. Used by the noop platform.
pub struct NullFileSaver;

impl FileSaver for NullFileSaver {
    fn save(&self, _file_name: &str, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Records saves in memory so tests can assert on delivered bytes.
#[derive(Default)]
pub struct MemoryFileSaver {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryFileSaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every `(file_name, bytes)` pair saved so far.
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl FileSaver for MemoryFileSaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_saver_records_saves() {
        let saver = MemoryFileSaver::new();
        saver.save("a.png", b"abc").unwrap();
        saver.save("b.svg", b"<svg/>").unwrap();
        let saved = saver.saved();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].0, "a.png");
        assert_eq!(saved[1].1, b"<svg/>".to_vec());
    }

    #[test]
    fn directory_saver_writes_the_file() {
        let dir = std::env::temp_dir().join("qrstudio-file-save-test");
        let saver = DirectoryFileSaver::new(&dir);
        saver.save("out.bin", b"payload").unwrap();
        assert_eq!(fs::read(dir.join("out.bin")).unwrap(), b"payload".to_vec());
        let _ = fs::remove_dir_all(&dir);
    }
}
