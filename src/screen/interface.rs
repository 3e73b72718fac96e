use crate::interaction::core::Phase;
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub label: String,
    pub percent_label: String,
    pub fill_fraction: f64,
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub phase: Phase,
    pub status: String,
    pub file_name: Option<String>,
    pub preview_location: Option<PathBuf>,
    pub is_drag_over: bool,
    pub prediction: Option<PredictionView>,
    pub error: Option<String>,
    pub can_browse: bool,
    pub can_classify: bool,
    pub can_remove: bool,
}

pub trait Screen: Send + Sync {
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>>;
}
