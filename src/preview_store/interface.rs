use crate::file_intake::interface::{PreviewHandle, SelectedFile};
use std::path::PathBuf;

/// Backing storage for preview handles.
pub trait PreviewStore {
    fn create(
        &self,
        handle: &PreviewHandle,
        file: &SelectedFile,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Must succeed when the handle was already released or never created.
    fn release(&self, handle: &PreviewHandle) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn locate(&self, handle: &PreviewHandle) -> Option<PathBuf>;
}
