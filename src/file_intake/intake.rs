use crate::file_intake::interface::{
    Adoption, CandidateFile, PreviewHandle, SelectedFile, Selection, SelectionId, ValidationError,
};

pub fn is_image_media_type(media_type: &str) -> bool {
    let media_type = media_type.trim().to_ascii_lowercase();
    match media_type.strip_prefix("image/") {
        Some(subtype) => !subtype.is_empty(),
        None => false,
    }
}

/// Validates `candidate` and, when it is an image, pairs it with a fresh preview handle.
///
/// The handle of the `current` selection, if any, is returned in `released` so the
/// caller drops it in the same step it installs the new selection. A rejected
/// candidate leaves `current` alone.
pub fn validate_and_adopt(
    candidate: Option<CandidateFile>,
    id: SelectionId,
    current: Option<&Selection>,
) -> Result<Adoption, ValidationError> {
    let candidate = candidate.ok_or(ValidationError::Missing)?;

    if !is_image_media_type(&candidate.media_type) {
        return Err(ValidationError::NotAnImage {
            media_type: candidate.media_type,
        });
    }

    let preview = PreviewHandle {
        id,
        media_type: candidate.media_type.clone(),
    };

    let file = SelectedFile {
        name: candidate.name,
        media_type: candidate.media_type,
        bytes: candidate.bytes,
    };

    Ok(Adoption {
        selection: Selection { file, preview },
        released: current.map(|selection| selection.preview.clone()),
    })
}

/// Takes the selection out, returning the handle to release. Calling it again is a no-op.
pub fn release(current: &mut Option<Selection>) -> Option<PreviewHandle> {
    current.take().map(|selection| selection.preview)
}
