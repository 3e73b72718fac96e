use crate::file_intake::interface::{PreviewHandle, SelectedFile};
use crate::file_intake::media_type::extension_for_media_type;
use crate::library::logger::interface::Logger;
use crate::preview_store::interface::PreviewStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Writes each preview to `<session dir>/preview-<id>.<ext>` and deletes it on release.
///
/// Every store owns a fresh `vehicle-classifier-*` folder under the base
/// directory, so concurrent sessions never share preview paths. The folder
/// and anything left in it are removed when the store is dropped.
pub struct PreviewStoreTempDir {
    dir: TempDir,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PreviewStoreTempDir {
    pub fn new(
        base_dir: &Path,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        std::fs::create_dir_all(base_dir)?;
        let dir = tempfile::Builder::new()
            .prefix("vehicle-classifier-")
            .tempdir_in(base_dir)?;

        let logger = logger.with_namespace("preview");
        logger.info(&format!("session previews in {}", dir.path().display()))?;

        Ok(Self { dir, logger })
    }

    pub fn session_dir(&self) -> &Path {
        self.dir.path()
    }

    fn path_for(&self, handle: &PreviewHandle) -> PathBuf {
        self.dir.path().join(format!(
            "preview-{}.{}",
            handle.id,
            extension_for_media_type(&handle.media_type)
        ))
    }
}

impl PreviewStore for PreviewStoreTempDir {
    fn create(
        &self,
        handle: &PreviewHandle,
        file: &SelectedFile,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = self.path_for(handle);
        std::fs::write(&path, &file.bytes[..])?;
        self.logger
            .info(&format!("created {} for {}", path.display(), file.name))?;
        Ok(())
    }

    fn release(&self, handle: &PreviewHandle) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = self.path_for(handle);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                self.logger.info(&format!("released {}", path.display()))?;
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Box::new(e)),
        }
    }

    fn locate(&self, handle: &PreviewHandle) -> Option<PathBuf> {
        let path = self.path_for(handle);
        path.exists().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    fn selected(name: &str) -> (PreviewHandle, SelectedFile) {
        let handle = PreviewHandle {
            id: 4,
            media_type: "image/jpeg".to_string(),
        };
        let file = SelectedFile {
            name: name.to_string(),
            media_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff].into(),
        };
        (handle, file)
    }

    fn store_in(base: &Path) -> PreviewStoreTempDir {
        PreviewStoreTempDir::new(base, Arc::new(LoggerFake::new())).unwrap()
    }

    #[test]
    fn test_create_locate_release() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir.path().join("previews"));
        let (handle, file) = selected("bus.jpg");

        store.create(&handle, &file).unwrap();

        let path = store.locate(&handle).unwrap();
        assert_eq!(path.file_name().unwrap(), "preview-4.jpg");
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, 0xd8, 0xff]);

        store.release(&handle).unwrap();
        assert!(store.locate(&handle).is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_release_twice_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let (handle, file) = selected("car.jpg");

        store.create(&handle, &file).unwrap();
        store.release(&handle).unwrap();
        store.release(&handle).unwrap();
    }

    #[test]
    fn test_sessions_sharing_a_base_dir_do_not_collide() {
        let base = tempfile::tempdir().unwrap();
        let first = store_in(base.path());
        let second = store_in(base.path());
        assert_ne!(first.session_dir(), second.session_dir());

        let (handle, file) = selected("bus.jpg");
        let other = SelectedFile {
            bytes: vec![2].into(),
            ..file.clone()
        };
        first.create(&handle, &file).unwrap();
        second.create(&handle, &other).unwrap();

        let path = first.locate(&handle).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, 0xd8, 0xff]);

        second.release(&handle).unwrap();
        assert_eq!(first.locate(&handle), Some(path));
    }

    #[test]
    fn test_dropping_the_store_removes_leftovers() {
        let base = tempfile::tempdir().unwrap();
        let store = store_in(base.path());
        let (handle, file) = selected("bus.jpg");
        store.create(&handle, &file).unwrap();
        let session_dir = store.session_dir().to_path_buf();

        drop(store);

        assert!(!session_dir.exists());
        assert!(base.path().exists());
    }

    #[test]
    fn test_base_dir_under_a_file_is_an_error() {
        let base = tempfile::tempdir().unwrap();
        let blocker = base.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        assert!(PreviewStoreTempDir::new(&blocker.join("previews"), Arc::new(LoggerFake::new())).is_err());
    }
}
