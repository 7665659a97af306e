//! Parameter Store Port
//!
//! Loads and persists ARM parameter files.

use std::path::Path;

use crate::domain::entities::ParameterFile;
use crate::error::ScdeployResult;

pub trait ParameterStore {
    fn exists(&self, path: &Path) -> bool;

    fn load(&self, path: &Path) -> ScdeployResult<ParameterFile>;

    /// Overwrite the file at `path`. Must be durable before returning:
    /// the next deployment reads it straight back.
    fn save(&self, path: &Path, file: &ParameterFile) -> ScdeployResult<()>;

    /// Load, let `edit` mutate, save. Implementations that can lock the
    /// file hold the lock for the whole read-modify-write.
    fn update<R>(
        &self,
        path: &Path,
        edit: impl FnOnce(&mut ParameterFile) -> R,
    ) -> ScdeployResult<(ParameterFile, ParameterFile, R)>
    where
        Self: Sized,
    {
        let before = self.load(path)?;
        let mut after = before.clone();
        let result = edit(&mut after);
        self.save(path, &after)?;
        Ok((before, after, result))
    }
}
