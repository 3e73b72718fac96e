use crate::classification_client::interface::{ClassificationResult, ClassifyError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: String,
    confidence: f64,
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turns a status code and raw body into a result or a failure.
pub fn decode_response(status: u16, body: &[u8]) -> Result<ClassificationResult, ClassifyError> {
    if !is_success(status) {
        return Err(ClassifyError::Service {
            status,
            message: error_message(body),
        });
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ClassifyError::Decode(e.to_string()))?;
    // Derived Deserialize also accepts a sequence for a struct; only an object is valid.
    if !value.is_object() {
        return Err(ClassifyError::Decode(format!(
            "expected a JSON object, got {}",
            value
        )));
    }
    let response: PredictResponse =
        serde_json::from_value(value).map_err(|e| ClassifyError::Decode(e.to_string()))?;

    if !response.confidence.is_finite() {
        return Err(ClassifyError::Decode(format!(
            "confidence is not a finite number: {}",
            response.confidence
        )));
    }

    Ok(ClassificationResult {
        label: response.prediction,
        confidence: response.confidence,
    })
}

/// Best effort: the `error` string of a JSON object body, otherwise nothing.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let result = decode_response(200, br#"{"prediction":"bus","confidence":0.87}"#).unwrap();

        assert_eq!(
            result,
            ClassificationResult {
                label: "bus".to_string(),
                confidence: 0.87,
            }
        );
    }

    #[test]
    fn test_success_with_extra_fields_and_integer_confidence() {
        let result =
            decode_response(201, br#"{"prediction":"car","confidence":1,"model":"v2"}"#).unwrap();

        assert_eq!(result.label, "car");
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_out_of_range_confidence_is_not_clamped() {
        let result = decode_response(200, br#"{"prediction":"car","confidence":1.5}"#).unwrap();
        assert_eq!(result.confidence, 1.5);

        let result = decode_response(200, br#"{"prediction":"car","confidence":-0.25}"#).unwrap();
        assert_eq!(result.confidence, -0.25);
    }

    #[test]
    fn test_malformed_success_bodies() {
        for body in [
            &b""[..],
            b"not json",
            br#"{"prediction":"bus"}"#,
            br#"{"confidence":0.5}"#,
            br#"{"prediction":3,"confidence":0.5}"#,
            br#"{"prediction":"bus","confidence":"0.5"}"#,
            br#"{"prediction":"bus","confidence":null}"#,
            br#"["bus",0.5]"#,
            br#""bus""#,
            b"0.5",
        ] {
            assert!(
                matches!(decode_response(200, body), Err(ClassifyError::Decode(_))),
                "expected decode failure for {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_positional_array_is_not_a_result() {
        let error = decode_response(200, br#"["car",0.91]"#).unwrap_err();

        match error {
            ClassifyError::Decode(reason) => assert!(reason.contains("object"), "{}", reason),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_service_failure_with_error_body() {
        assert_eq!(
            decode_response(400, br#"{"error":"No image file provided"}"#),
            Err(ClassifyError::Service {
                status: 400,
                message: Some("No image file provided".to_string()),
            })
        );
    }

    #[test]
    fn test_service_failure_tolerates_missing_or_odd_body() {
        for body in [
            &b""[..],
            b"<html>Internal Server Error</html>",
            br#"{"error":42}"#,
            br#"{"detail":"boom"}"#,
            br#""just a string""#,
        ] {
            assert_eq!(
                decode_response(500, body),
                Err(ClassifyError::Service {
                    status: 500,
                    message: None,
                })
            );
        }
    }

    #[test]
    fn test_success_body_on_error_status_is_still_a_service_failure() {
        assert!(matches!(
            decode_response(503, br#"{"prediction":"bus","confidence":0.9}"#),
            Err(ClassifyError::Service { status: 503, .. })
        ));
    }
}
