use crate::classification_client::interface::ClassificationResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub percent_label: String,
    /// Raw confidence, used as-is for the width of the confidence bar.
    pub fill_fraction: f64,
}

pub fn format(result: &ClassificationResult) -> Presentation {
    Presentation {
        percent_label: format!("{:.1}%", result.confidence * 100.0),
        fill_fraction: result.confidence,
    }
}
