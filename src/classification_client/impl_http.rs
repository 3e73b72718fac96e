use crate::classification_client::decode::decode_response;
use crate::classification_client::interface::{
    ClassificationClient, ClassificationResult, ClassifyError, UPLOAD_FIELD,
};
use crate::config::Config;
use crate::file_intake::interface::SelectedFile;
use crate::library::logger::interface::Logger;
use reqwest::blocking::multipart::{Form, Part};
use std::sync::Arc;

pub struct ClassificationClientHttp {
    client: reqwest::blocking::Client,
    endpoint: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassificationClientHttp {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.predict_endpoint(),
            logger: logger.with_namespace("client").with_namespace("http"),
        })
    }

    fn build_form(file: &SelectedFile) -> Form {
        let bytes = file.bytes.to_vec();
        // An unparseable declared type still uploads, just without a part content type.
        let part = match Part::bytes(bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
        {
            Ok(part) => part,
            Err(_) => Part::bytes(bytes).file_name(file.name.clone()),
        };
        Form::new().part(UPLOAD_FIELD, part)
    }
}

impl ClassificationClient for ClassificationClientHttp {
    fn classify(&self, file: &SelectedFile) -> Result<ClassificationResult, ClassifyError> {
        let _ = self.logger.info(&format!(
            "POST {} ({}, {} bytes)",
            self.endpoint,
            file.name,
            file.bytes.len()
        ));

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Self::build_form(file))
            .send()
            .map_err(|e| {
                let _ = self.logger.warn(&format!("request failed: {}", e));
                ClassifyError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let _ = self
            .logger
            .info(&format!("status {} ({} byte body)", status, body.len()));

        decode_response(status, &body)
    }
}
