//! Image generation adapter.

use async_trait::async_trait;
use proto::{AdapterError, Content, Feature};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::{FeatureAdapter, Turn};
use crate::http::{decode, require_success, transport};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    image_url: Option<String>,
}

/// Adapter for the image generation backend.
pub struct ImageGen {
    client: reqwest::Client,
    endpoint: String,
}

impl ImageGen {
    /// Creates the adapter targeting the `/generate-image` URL.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeatureAdapter for ImageGen {
    fn feature(&self) -> Feature {
        Feature::ImageGen
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&self, turn: Turn<'_>) -> Result<Option<Content>, AdapterError> {
        debug!(endpoint = %self.endpoint, "Requesting image");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest {
                prompt: turn.prompt,
            })
            .send()
            .await
            .map_err(transport)?;
        require_success(&response)?;

        let body: GenerateResponse = decode(response).await?;
        Ok(Content::image(body.image_url))
    }

    fn failure_text(&self, _err: &AdapterError) -> String {
        "Could not generate image.".to_string()
    }
}
