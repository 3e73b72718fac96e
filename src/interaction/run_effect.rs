use crate::interaction::controller::InteractionController;
use crate::interaction::core::{Effect, Msg};

impl InteractionController {
    pub(crate) fn run_effects(&self, effects: Vec<Effect>) {
        // Preview effects run in order so a release always precedes its replacement.
        for effect in effects {
            self.run_effect(effect);
        }
    }

    pub(crate) fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::ReleasePreview(handle) => {
                if let Err(e) = self.preview_store.release(&handle) {
                    let _ = self
                        .logger
                        .warn(&format!("release of preview {} failed: {}", handle.id, e));
                }
            }
            Effect::CreatePreview { handle, file } => {
                if let Err(e) = self.preview_store.create(&handle, &file) {
                    let _ = self
                        .logger
                        .error(&format!("preview {} for {} failed: {}", handle.id, file.name, e));
                    // Handled before the caller renders, so no view shows a file without a preview.
                    self.dispatch(Msg::PreviewFailed(handle));
                }
            }
            Effect::Classify { token, file } => {
                let client = self.classification_client.clone();
                let msg_sender = self.msg_sender.clone();
                let logger = self.logger.with_namespace("effect");
                std::thread::spawn(move || {
                    let result = client.classify(&file);
                    if msg_sender.send(Msg::ClassifyDone { token, result }).is_err() {
                        let _ = logger.warn(&format!(
                            "controller gone before request {} resolved",
                            token.request_id
                        ));
                    }
                });
            }
        }
    }
}
