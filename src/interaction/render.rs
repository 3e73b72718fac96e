use crate::file_intake::interface::PreviewHandle;
use crate::interaction::core::{Model, Phase};
use crate::result_presenter;
use crate::screen::interface::{PredictionView, View};
use std::path::PathBuf;

pub fn status_line(model: &Model) -> String {
    if model.is_drag_over {
        return "Release to upload".to_string();
    }

    match model.phase() {
        Phase::Idle => "Drag & drop your image here, or browse files to upload".to_string(),
        Phase::Ready => "Ready to classify".to_string(),
        Phase::Loading => "Analyzing...".to_string(),
        Phase::Succeeded => "Classification result".to_string(),
        Phase::Failed => "Classification failed".to_string(),
    }
}

pub fn render<F>(model: &Model, locate: F) -> View
where
    F: Fn(&PreviewHandle) -> Option<PathBuf>,
{
    View {
        phase: model.phase(),
        status: status_line(model),
        file_name: model.selected_file().map(|file| file.name.clone()),
        preview_location: model.preview().and_then(locate),
        is_drag_over: model.is_drag_over,
        prediction: model.result().map(|result| {
            let presentation = result_presenter::format(result);
            PredictionView {
                label: result.label.clone(),
                percent_label: presentation.percent_label,
                fill_fraction: presentation.fill_fraction,
            }
        }),
        error: model.failure().map(|failure| failure.message.clone()),
        can_browse: model.selection.is_none(),
        can_classify: model.can_classify(),
        can_remove: model.selection.is_some(),
    }
}
