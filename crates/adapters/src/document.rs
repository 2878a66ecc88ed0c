//! Document Q&A adapter: upload once, then ask questions about it.

use async_trait::async_trait;
use proto::{AdapterError, Content, Feature};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapter::{FeatureAdapter, Requirement, Turn};
use crate::http::{decode, file_form, transport};
use crate::resource::FileHandle;

#[derive(Debug, Serialize)]
struct QuestionRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct QuestionResponse {
    answer: Option<String>,
}

/// Adapter for the document Q&A backend.
pub struct DocumentChat {
    client: reqwest::Client,
    upload_endpoint: String,
    question_endpoint: String,
}

impl DocumentChat {
    /// Creates the adapter with the `/upload` and `/question` URLs.
    pub fn new(
        client: reqwest::Client,
        upload_endpoint: impl Into<String>,
        question_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            upload_endpoint: upload_endpoint.into(),
            question_endpoint: question_endpoint.into(),
        }
    }

    /// URL the document is uploaded to.
    pub fn upload_endpoint(&self) -> &str {
        &self.upload_endpoint
    }
}

#[async_trait]
impl FeatureAdapter for DocumentChat {
    fn feature(&self) -> Feature {
        Feature::DocumentChat
    }

    fn endpoint(&self) -> &str {
        &self.question_endpoint
    }

    fn requirement(&self) -> Requirement {
        Requirement::UploadFirst
    }

    async fn upload(&self, file: &FileHandle) -> Result<(), AdapterError> {
        debug!(
            endpoint = %self.upload_endpoint,
            file = %file.name,
            size = %file.bytes.len(),
            "Uploading document"
        );
        let response = self
            .client
            .post(&self.upload_endpoint)
            .multipart(file_form(file)?)
            .send()
            .await
            .map_err(transport)?;
        // Any response counts as accepted; the backend's status is not consulted.
        info!(file = %file.name, status = %response.status(), "Document uploaded");
        Ok(())
    }

    async fn exchange(&self, turn: Turn<'_>) -> Result<Option<Content>, AdapterError> {
        debug!(endpoint = %self.question_endpoint, "Sending document question");
        // Status is not inspected: any JSON body is read for `answer`.
        let response = self
            .client
            .post(&self.question_endpoint)
            .json(&QuestionRequest {
                question: turn.prompt,
            })
            .send()
            .await
            .map_err(transport)?;

        let body: QuestionResponse = decode(response).await?;
        Ok(Content::text(body.answer))
    }

    fn failure_text(&self, _err: &AdapterError) -> String {
        "Sorry, cannot chat right now.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_upload_and_never_distinguishes_status() {
        let adapter = DocumentChat::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/upload",
            "http://127.0.0.1:1/question",
        );
        assert_eq!(adapter.requirement(), Requirement::UploadFirst);
        assert_eq!(adapter.endpoint(), "http://127.0.0.1:1/question");
        for err in [
            AdapterError::HttpStatus(404),
            AdapterError::HttpStatus(500),
            AdapterError::Transport("reset".to_string()),
        ] {
            assert_eq!(adapter.failure_text(&err), "Sorry, cannot chat right now.");
        }
    }

    #[test]
    fn upload_notice_reflects_outcome() {
        let adapter = DocumentChat::new(reqwest::Client::new(), "u", "q");
        assert_eq!(adapter.upload_notice(&Ok(())), "Document uploaded.");
        assert_eq!(
            adapter.upload_notice(&Err(AdapterError::HttpStatus(500))),
            "Upload failed."
        );
    }
}
