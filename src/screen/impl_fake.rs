use crate::screen::interface::{Screen, View};
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct ScreenFake {
    views: Arc<Mutex<Vec<View>>>,
}

impl ScreenFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> Vec<View> {
        match self.views.lock() {
            Ok(views) => views.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<View> {
        self.views().pop()
    }
}

impl Screen for ScreenFake {
    fn show(&mut self, view: &View) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut views = match self.views.lock() {
            Ok(views) => views,
            Err(poisoned) => poisoned.into_inner(),
        };
        views.push(view.clone());
        Ok(())
    }
}
