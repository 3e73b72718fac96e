use std::fmt;
use std::sync::Arc;

/// Monotonic id handed out per adopted file; doubles as the preview handle id.
pub type SelectionId = u64;

/// A file as it arrives from a picker or a drop, before validation.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl CandidateFile {
    pub fn new(name: &str, media_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            media_type: media_type.to_string(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Revocable reference to the displayable copy of a selected file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    pub id: SelectionId,
    pub media_type: String,
}

/// A selected file together with its live preview. One cannot exist without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub file: SelectedFile,
    pub preview: PreviewHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adoption {
    pub selection: Selection,
    pub released: Option<PreviewHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no file was provided")]
    Missing,
    #[error("{media_type:?} is not an image media type")]
    NotAnImage { media_type: String },
}
