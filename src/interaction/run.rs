use crate::interaction::controller::{ControllerError, InteractionController};
use crate::interaction::core::Msg;

impl InteractionController {
    /// Handles queued messages until a teardown has been processed.
    pub fn run(&self) -> Result<(), ControllerError> {
        loop {
            let msg = super::controller::lock(&self.msg_receiver)
                .recv()
                .map_err(|_| ControllerError::Disconnected)?;

            let is_teardown = matches!(msg, Msg::Teardown);
            self.dispatch(msg);

            if is_teardown {
                let _ = self.logger.info("torn down");
                return Ok(());
            }
        }
    }

    pub fn teardown(&self) {
        self.dispatch(Msg::Teardown);
    }
}
