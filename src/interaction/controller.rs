use crate::classification_client::interface::ClassificationClient;
use crate::interaction::core::{init, transition, Model, Msg};
use crate::interaction::render::render;
use crate::library::logger::interface::Logger;
use crate::preview_store::interface::PreviewStore;
use crate::screen::interface::Screen;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("message channel closed")]
    Disconnected,
}

/// Owns the interaction model. Every action goes through [`InteractionController::dispatch`].
#[derive(Clone)]
pub struct InteractionController {
    pub(crate) model: Arc<Mutex<Model>>,
    pub(crate) msg_sender: Sender<Msg>,
    pub(crate) msg_receiver: Arc<Mutex<Receiver<Msg>>>,
    pub(crate) logger: Arc<dyn Logger + Send + Sync>,
    pub(crate) preview_store: Arc<dyn PreviewStore + Send + Sync>,
    pub(crate) classification_client: Arc<dyn ClassificationClient + Send + Sync>,
    pub(crate) screen: Arc<Mutex<dyn Screen + Send + Sync>>,
}

pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl InteractionController {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        preview_store: Arc<dyn PreviewStore + Send + Sync>,
        classification_client: Arc<dyn ClassificationClient + Send + Sync>,
        screen: Arc<Mutex<dyn Screen + Send + Sync>>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();
        let (model, effects) = init();

        let controller = Self {
            model: Arc::new(Mutex::new(model)),
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
            logger: logger.with_namespace("controller"),
            preview_store,
            classification_client,
            screen,
        };

        controller.run_effects(effects);
        controller.render();
        controller
    }

    /// Handle for front-ends that feed actions from another thread.
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_sender.clone()
    }

    pub fn model(&self) -> Model {
        lock(&self.model).clone()
    }

    pub fn dispatch(&self, msg: Msg) {
        let _ = self.logger.info(&format!("msg: {:?}", msg));

        let effects = {
            let mut model = lock(&self.model);

            if let Msg::ClassifyDone { token, .. } = &msg {
                let current = model.selection.as_ref().map(|s| s.preview.id);
                if model.in_flight == Some(*token) && current != Some(token.selection_id) {
                    let _ = self.logger.warn(&format!(
                        "discarding response for replaced selection {}",
                        token.selection_id
                    ));
                }
            }

            let (new_model, effects) = transition(model.clone(), msg);
            let _ = self.logger.info(&format!(
                "phase: {:?} -> {:?}, effects: {:?}",
                model.phase(),
                new_model.phase(),
                effects
            ));
            if let Some(failure) = new_model.failure().filter(|f| model.failure() != Some(*f)) {
                let _ = self.logger.warn(&format!(
                    "failure ({:?}): {}",
                    failure.category, failure.message
                ));
            }
            *model = new_model;
            effects
        };

        self.run_effects(effects);
        self.render();
    }

    /// Blocks until one queued message has been handled.
    pub fn process_next(&self) -> Result<(), ControllerError> {
        let msg = lock(&self.msg_receiver)
            .recv()
            .map_err(|_| ControllerError::Disconnected)?;
        self.dispatch(msg);
        Ok(())
    }

    /// Like [`Self::process_next`], returning `Ok(false)` if nothing arrived in time.
    pub fn process_next_timeout(&self, timeout: Duration) -> Result<bool, ControllerError> {
        let received = lock(&self.msg_receiver).recv_timeout(timeout);
        match received {
            Ok(msg) => {
                self.dispatch(msg);
                Ok(true)
            }
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => Err(ControllerError::Disconnected),
        }
    }

    pub(crate) fn render(&self) {
        let view = {
            let model = lock(&self.model);
            render(&model, |handle| self.preview_store.locate(handle))
        };

        if let Err(e) = lock(&self.screen).show(&view) {
            let _ = self.logger.error(&format!("render failed: {}", e));
        }
    }
}
