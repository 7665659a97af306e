//! JSON Parameter Store
//!
//! Implements the ParameterStore port for ARM parameter files on disk.
//! Writes go through a temp file in the same directory and are renamed
//! into place. `update` holds an exclusive lock on `<file>.lock` for the
//! whole read-modify-write. The lock file is left in place: removing it
//! would let a waiter and a newcomer lock different inodes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::entities::ParameterFile;
use crate::domain::ports::ParameterStore;
use crate::error::{ScdeployError, ScdeployResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParameterStore;

impl JsonParameterStore {
    pub fn new() -> Self {
        Self
    }

    fn lock_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        path.with_file_name(name)
    }

    fn lock(path: &Path) -> ScdeployResult<fs::File> {
        let lock_path = Self::lock_path(path);
        let lock_err = |e: std::io::Error| ScdeployError::Lock {
            path: lock_path.clone(),
            message: e.to_string(),
        };

        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        Ok(file)
    }

    fn unlock(file: fs::File) {
        let _ = file.unlock();
    }

    fn write_atomic(path: &Path, content: &str) -> ScdeployResult<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| ScdeployError::Io(e.error))?;
        Ok(())
    }
}

impl ParameterStore for JsonParameterStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> ScdeployResult<ParameterFile> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScdeployError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ScdeployError::Io(e),
        })?;
        ParameterFile::from_json(&content, path)
    }

    fn save(&self, path: &Path, file: &ParameterFile) -> ScdeployResult<()> {
        Self::write_atomic(path, &file.to_json_pretty())
    }

    fn update<R>(
        &self,
        path: &Path,
        edit: impl FnOnce(&mut ParameterFile) -> R,
    ) -> ScdeployResult<(ParameterFile, ParameterFile, R)> {
        let lock = Self::lock(path)?;

        let result: ScdeployResult<_> = (|| {
            let before = self.load(path)?;
            let mut after = before.clone();
            let out = edit(&mut after);
            self.save(path, &after)?;
            Ok((before, after, out))
        })();

        Self::unlock(lock);
        result
    }
}
