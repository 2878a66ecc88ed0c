//! Webpage Q&A adapter: asks questions about the active tab's page.

use async_trait::async_trait;
use proto::{AdapterError, Content, Feature};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::{FeatureAdapter, Turn};
use crate::http::{decode, require_success, transport};

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    url: &'a str,
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    answer: Option<String>,
}

/// Adapter for the webpage Q&A backend.
pub struct WebpageChat {
    client: reqwest::Client,
    endpoint: String,
}

impl WebpageChat {
    /// Creates the adapter targeting `endpoint` (the full `/ask` URL).
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeatureAdapter for WebpageChat {
    fn feature(&self) -> Feature {
        Feature::WebpageChat
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&self, turn: Turn<'_>) -> Result<Option<Content>, AdapterError> {
        let url = turn.host.active_tab_url().await;
        debug!(endpoint = %self.endpoint, page = %url, "Sending webpage question");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AskRequest {
                url: &url,
                question: turn.prompt,
            })
            .send()
            .await
            .map_err(transport)?;
        debug!(status = %response.status().as_u16(), "Webpage backend responded");
        require_success(&response)?;

        let body: AskResponse = decode(response).await?;
        Ok(Content::text(body.answer))
    }

    fn failure_text(&self, err: &AdapterError) -> String {
        match err {
            AdapterError::HttpStatus(404) => "Wrong format of input (404)",
            AdapterError::HttpStatus(500) => "Server error (500)",
            _ => "An error occurred.",
        }
        .to_string()
    }
}
