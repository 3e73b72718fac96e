use crate::classification_client::interface::{
    ClassificationClient, ClassificationResult, ClassifyError,
};
use crate::file_intake::interface::SelectedFile;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const LABELS: [&str; 2] = ["bus", "car"];

/// Answers from a script first, then with a random bus/car prediction.
pub struct ClassificationClientFake {
    logger: Arc<dyn Logger + Send + Sync>,
    latency: Duration,
    script: Mutex<VecDeque<Result<ClassificationResult, ClassifyError>>>,
    calls: AtomicUsize,
}

impl ClassificationClientFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("client").with_namespace("fake"),
            latency: Duration::ZERO,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_script(self, script: Vec<Result<ClassificationResult, ClassifyError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..self
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_scripted(&self) -> Option<Result<ClassificationResult, ClassifyError>> {
        match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }

    fn random_result() -> Result<ClassificationResult, ClassifyError> {
        let mut rng = rand::rng();

        let index_dist =
            Uniform::new(0, LABELS.len()).map_err(|e| ClassifyError::Decode(e.to_string()))?;
        let confidence_dist =
            Uniform::new(0.5, 1.0).map_err(|e| ClassifyError::Decode(e.to_string()))?;

        Ok(ClassificationResult {
            label: LABELS[index_dist.sample(&mut rng)].to_string(),
            confidence: confidence_dist.sample(&mut rng),
        })
    }
}

impl ClassificationClient for ClassificationClientFake {
    fn classify(&self, file: &SelectedFile) -> Result<ClassificationResult, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!("classifying {}", file.name));

        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let result = self.next_scripted().unwrap_or_else(Self::random_result);
        let _ = self.logger.info(&format!("result {:?}", result));
        result
    }
}
