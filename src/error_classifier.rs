use crate::classification_client::interface::ClassifyError;
use crate::file_intake::interface::ValidationError;

pub const VALIDATION_MESSAGE: &str = "Please upload an image file (JPG, PNG, WEBP, etc.)";
pub const TRANSPORT_MESSAGE: &str =
    "Cannot connect to the classification server. It may be offline or still starting up.";
pub const UNKNOWN_MESSAGE: &str = "Something went wrong. Please try again.";
pub const PREVIEW_MESSAGE: &str = "Could not prepare a preview of this file. Please try again.";

/// Every way a user action can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    Validation(ValidationError),
    Classify(ClassifyError),
    /// The accepted file could not be backed by a preview.
    Preview,
}

/// Internal only; the presentation layer shows the message alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Validation,
    Network,
    Server,
    Storage,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureState {
    pub message: String,
    pub category: FailureCategory,
}

#[allow(dead_code)]
pub fn message(failure: &Failure) -> String {
    classify(failure).message
}

pub fn classify(failure: &Failure) -> FailureState {
    match failure {
        Failure::Validation(_) => FailureState {
            message: VALIDATION_MESSAGE.to_string(),
            category: FailureCategory::Validation,
        },
        Failure::Classify(ClassifyError::Transport(_)) => FailureState {
            message: TRANSPORT_MESSAGE.to_string(),
            category: FailureCategory::Network,
        },
        Failure::Classify(ClassifyError::Service { status, message }) => {
            let message = match message.as_deref().map(str::trim) {
                Some(message) if !message.is_empty() => message.to_string(),
                _ => format!("Server error: {}", status),
            };
            FailureState {
                message,
                category: FailureCategory::Server,
            }
        }
        Failure::Classify(ClassifyError::Decode(_)) => FailureState {
            message: UNKNOWN_MESSAGE.to_string(),
            category: FailureCategory::Unknown,
        },
        Failure::Preview => FailureState {
            message: PREVIEW_MESSAGE.to_string(),
            category: FailureCategory::Storage,
        },
    }
}

impl From<ValidationError> for Failure {
    fn from(error: ValidationError) -> Self {
        Failure::Validation(error)
    }
}

impl From<ClassifyError> for Failure {
    fn from(error: ClassifyError) -> Self {
        Failure::Classify(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(status: u16, message: Option<&str>) -> Failure {
        Failure::Classify(ClassifyError::Service {
            status,
            message: message.map(str::to_string),
        })
    }

    #[test]
    fn test_validation() {
        let state = classify(&Failure::Validation(ValidationError::NotAnImage {
            media_type: "text/plain".to_string(),
        }));

        assert_eq!(state.message, VALIDATION_MESSAGE);
        assert_eq!(state.category, FailureCategory::Validation);
    }

    #[test]
    fn test_transport() {
        let state = classify(&ClassifyError::Transport("connection refused".to_string()).into());

        assert_eq!(state.message, TRANSPORT_MESSAGE);
        assert_eq!(state.category, FailureCategory::Network);
    }

    #[test]
    fn test_service_message_is_shown_verbatim() {
        assert_eq!(
            message(&service(400, Some("No image file provided"))),
            "No image file provided"
        );
    }

    #[test]
    fn test_service_without_usable_message() {
        assert_eq!(message(&service(500, None)), "Server error: 500");
        assert_eq!(message(&service(502, Some(""))), "Server error: 502");
        assert_eq!(message(&service(503, Some("   "))), "Server error: 503");
        assert_eq!(classify(&service(500, None)).category, FailureCategory::Server);
    }

    #[test]
    fn test_preview() {
        let state = classify(&Failure::Preview);

        assert_eq!(state.message, PREVIEW_MESSAGE);
        assert_eq!(state.category, FailureCategory::Storage);
    }

    #[test]
    fn test_decode() {
        let state = classify(&ClassifyError::Decode("missing field".to_string()).into());

        assert_eq!(state.message, UNKNOWN_MESSAGE);
        assert_eq!(state.category, FailureCategory::Unknown);
    }
}
