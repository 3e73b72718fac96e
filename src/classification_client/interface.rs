use crate::file_intake::interface::SelectedFile;

/// Multipart field carrying the image bytes.
pub const UPLOAD_FIELD: &str = "image";

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    /// Nominally in [0, 1] but passed through exactly as the service sent it.
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    #[error("could not reach the classification service: {0}")]
    Transport(String),
    #[error("classification service responded with status {status}")]
    Service { status: u16, message: Option<String> },
    #[error("could not decode the classification response: {0}")]
    Decode(String),
}

/// One call issues exactly one request. Implementations never retry.
pub trait ClassificationClient {
    fn classify(&self, file: &SelectedFile) -> Result<ClassificationResult, ClassifyError>;
}
