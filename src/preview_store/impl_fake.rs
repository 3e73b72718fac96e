use crate::file_intake::interface::{PreviewHandle, SelectedFile};
use crate::preview_store::interface::PreviewStore;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
    Created(u64),
    Released(u64),
}

/// Tracks live handles in memory so tests can check for leaks.
#[derive(Debug, Clone, Default)]
pub struct PreviewStoreFake {
    live: Arc<Mutex<BTreeSet<u64>>>,
    events: Arc<Mutex<Vec<PreviewEvent>>>,
    fail_create: Arc<Mutex<bool>>,
}

impl PreviewStoreFake {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        match mutex.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Makes every following `create` fail, as a full or read-only disk would.
    pub fn fail_creates(&self, fail: bool) {
        *Self::lock(&self.fail_create) = fail;
    }

    pub fn live(&self) -> Vec<u64> {
        Self::lock(&self.live).iter().copied().collect()
    }

    pub fn events(&self) -> Vec<PreviewEvent> {
        Self::lock(&self.events).clone()
    }
}

impl PreviewStore for PreviewStoreFake {
    fn create(
        &self,
        handle: &PreviewHandle,
        _file: &SelectedFile,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if *Self::lock(&self.fail_create) {
            return Err(format!("no space left for preview {}", handle.id).into());
        }
        if !Self::lock(&self.live).insert(handle.id) {
            return Err(format!("preview {} already live", handle.id).into());
        }
        Self::lock(&self.events).push(PreviewEvent::Created(handle.id));
        Ok(())
    }

    fn release(&self, handle: &PreviewHandle) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if Self::lock(&self.live).remove(&handle.id) {
            Self::lock(&self.events).push(PreviewEvent::Released(handle.id));
        }
        Ok(())
    }

    fn locate(&self, handle: &PreviewHandle) -> Option<PathBuf> {
        Self::lock(&self.live)
            .contains(&handle.id)
            .then(|| PathBuf::from(format!("fake://preview/{}", handle.id)))
    }
}
