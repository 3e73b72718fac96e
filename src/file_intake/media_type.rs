use crate::file_intake::interface::CandidateFile;
use std::path::Path;

const MEDIA_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
];

pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = match path.extension().and_then(|e| e.to_str()) {
        Some(extension) => extension.to_ascii_lowercase(),
        None => return UNKNOWN_MEDIA_TYPE,
    };

    MEDIA_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, media_type)| *media_type)
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

pub fn extension_for_media_type(media_type: &str) -> &'static str {
    let media_type = media_type.trim().to_ascii_lowercase();
    MEDIA_TYPES
        .iter()
        .find(|(_, mt)| *mt == media_type)
        .map(|(ext, _)| *ext)
        .unwrap_or("bin")
}

impl CandidateFile {
    /// Reads a file from disk, declaring its media type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(CandidateFile::new(&name, media_type_for_path(path), bytes))
    }
}
