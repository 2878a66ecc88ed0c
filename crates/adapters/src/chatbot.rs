//! General-purpose remote chatbot adapter.

use async_trait::async_trait;
use proto::{AdapterError, Content, Feature};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::{FeatureAdapter, Turn};
use crate::http::{decode, transport};

/// Role label the chatbot backend expects for user prompts.
const HUMAN_ROLE: &str = "Human";

#[derive(Debug, Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
    role: &'static str,
}

#[derive(Debug, Deserialize)]
struct PromptResponse {
    response: Option<String>,
}

/// Adapter for the remote chatbot.
pub struct GenericChatbot {
    client: reqwest::Client,
    endpoint: String,
}

impl GenericChatbot {
    /// Creates the adapter targeting the chatbot URL.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeatureAdapter for GenericChatbot {
    fn feature(&self) -> Feature {
        Feature::GenericChatbot
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&self, turn: Turn<'_>) -> Result<Option<Content>, AdapterError> {
        debug!(
            endpoint = %self.endpoint,
            prompt_len = %turn.prompt.len(),
            "Sending chatbot prompt"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PromptRequest {
                prompt: turn.prompt,
                role: HUMAN_ROLE,
            })
            .send()
            .await
            .map_err(transport)?;

        let body: PromptResponse = decode(response).await?;
        Ok(Content::text(body.response))
    }

    fn failure_text(&self, _err: &AdapterError) -> String {
        "Sorry, cannot chat right now.".to_string()
    }
}
