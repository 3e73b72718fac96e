use crate::classification_client::interface::{ClassificationResult, ClassifyError};
use crate::error_classifier::{self, Failure, FailureState};
use crate::file_intake::intake::{release, validate_and_adopt};
use crate::file_intake::interface::{
    CandidateFile, PreviewHandle, SelectedFile, Selection, SelectionId, ValidationError,
};

//
// Model
//

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded(ClassificationResult),
    Failed(FailureState),
}

/// Identifies a classify request and the selection it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub request_id: u64,
    pub selection_id: SelectionId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub selection: Option<Selection>,
    pub outcome: Option<Outcome>,
    pub in_flight: Option<RequestToken>,
    pub is_drag_over: bool,
    pub next_selection_id: SelectionId,
    pub next_request_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Loading,
    Succeeded,
    Failed,
}

impl Model {
    pub fn phase(&self) -> Phase {
        match (&self.in_flight, &self.outcome, &self.selection) {
            (Some(_), _, _) => Phase::Loading,
            (None, Some(Outcome::Failed(_)), _) => Phase::Failed,
            (None, Some(Outcome::Succeeded(_)), _) => Phase::Succeeded,
            (None, None, Some(_)) => Phase::Ready,
            (None, None, None) => Phase::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_classify(&self) -> bool {
        self.selection.is_some() && !self.is_loading()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selection.as_ref().map(|s| &s.file)
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.selection.as_ref().map(|s| &s.preview)
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.outcome {
            Some(Outcome::Succeeded(result)) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureState> {
        match &self.outcome {
            Some(Outcome::Failed(failure)) => Some(failure),
            _ => None,
        }
    }
}

//
// Msg / Effect
//

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    SelectFile(Option<CandidateFile>),
    RemoveFile,
    Classify,
    ClassifyDone {
        token: RequestToken,
        result: Result<ClassificationResult, ClassifyError>,
    },
    DragEnter,
    DragLeave,
    Drop(Option<CandidateFile>),
    /// Backing storage for this preview could not be created.
    PreviewFailed(PreviewHandle),
    Teardown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ReleasePreview(PreviewHandle),
    CreatePreview {
        handle: PreviewHandle,
        file: SelectedFile,
    },
    Classify {
        token: RequestToken,
        file: SelectedFile,
    },
}

//
// Transition
//

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![])
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::SelectFile(candidate) => select_file(model, candidate),

        Msg::Drop(candidate) => select_file(
            Model {
                is_drag_over: false,
                ..model
            },
            candidate,
        ),

        Msg::DragEnter => (
            Model {
                is_drag_over: true,
                ..model
            },
            vec![],
        ),

        Msg::DragLeave => (
            Model {
                is_drag_over: false,
                ..model
            },
            vec![],
        ),

        Msg::RemoveFile => {
            let mut model = model;
            match release(&mut model.selection) {
                Some(handle) => {
                    model.outcome = None;
                    (model, vec![Effect::ReleasePreview(handle)])
                }
                None => (model, vec![]),
            }
        }

        Msg::Classify => {
            if model.in_flight.is_some() {
                return (model, vec![]);
            }
            let selection = match model.selection.clone() {
                Some(selection) => selection,
                None => return (model, vec![]),
            };

            let token = RequestToken {
                request_id: model.next_request_id,
                selection_id: selection.preview.id,
            };

            (
                Model {
                    in_flight: Some(token),
                    outcome: None,
                    next_request_id: model.next_request_id + 1,
                    ..model
                },
                vec![Effect::Classify {
                    token,
                    file: selection.file,
                }],
            )
        }

        Msg::ClassifyDone { token, result } => {
            if model.in_flight != Some(token) {
                return (model, vec![]);
            }

            let is_current = model
                .selection
                .as_ref()
                .map(|s| s.preview.id == token.selection_id)
                .unwrap_or(false);

            let outcome = if is_current {
                Some(match result {
                    Ok(result) => Outcome::Succeeded(result),
                    Err(error) => {
                        Outcome::Failed(error_classifier::classify(&Failure::Classify(error)))
                    }
                })
            } else {
                // The file changed while the request was in flight; keep whatever
                // the newer selection produced.
                model.outcome.clone()
            };

            (
                Model {
                    in_flight: None,
                    outcome,
                    ..model
                },
                vec![],
            )
        }

        Msg::PreviewFailed(handle) => {
            if model.preview() != Some(&handle) {
                return (model, vec![]);
            }
            // The previous preview is already gone, so the selection cannot be rolled back.
            let mut model = model;
            let effects: Vec<Effect> = release(&mut model.selection)
                .map(Effect::ReleasePreview)
                .into_iter()
                .collect();
            (
                Model {
                    outcome: Some(Outcome::Failed(error_classifier::classify(
                        &Failure::Preview,
                    ))),
                    ..model
                },
                effects,
            )
        }

        Msg::Teardown => {
            let mut model = model;
            let effects: Vec<Effect> = release(&mut model.selection)
                .map(Effect::ReleasePreview)
                .into_iter()
                .collect();
            (
                Model {
                    selection: None,
                    outcome: None,
                    in_flight: None,
                    is_drag_over: false,
                    ..model
                },
                effects,
            )
        }
    }
}

fn select_file(model: Model, candidate: Option<CandidateFile>) -> (Model, Vec<Effect>) {
    match validate_and_adopt(candidate, model.next_selection_id, model.selection.as_ref()) {
        Ok(adoption) => {
            let mut effects = Vec::new();
            if let Some(released) = adoption.released {
                effects.push(Effect::ReleasePreview(released));
            }
            effects.push(Effect::CreatePreview {
                handle: adoption.selection.preview.clone(),
                file: adoption.selection.file.clone(),
            });

            (
                Model {
                    selection: Some(adoption.selection),
                    outcome: None,
                    next_selection_id: model.next_selection_id + 1,
                    ..model
                },
                effects,
            )
        }
        Err(ValidationError::Missing) => (model, vec![]),
        Err(error) => (
            Model {
                outcome: Some(Outcome::Failed(error_classifier::classify(
                    &Failure::Validation(error),
                ))),
                ..model
            },
            vec![],
        ),
    }
}
