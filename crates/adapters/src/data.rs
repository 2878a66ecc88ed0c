//! CSV data analysis adapter.

use async_trait::async_trait;
use proto::{AdapterError, Content, Feature};
use serde::Deserialize;
use tracing::debug;

use crate::adapter::{FeatureAdapter, Requirement, Turn};
use crate::http::{decode, file_form, transport};

const NO_INSIGHTS: &str = "No insights.";

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    insights: Option<String>,
}

/// Adapter for the CSV insights backend.
pub struct DataAnalysis {
    client: reqwest::Client,
    endpoint: String,
}

impl DataAnalysis {
    /// Creates the adapter targeting the `/analyze-csv/` URL.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeatureAdapter for DataAnalysis {
    fn feature(&self) -> Feature {
        Feature::DataAnalysis
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn requirement(&self) -> Requirement {
        Requirement::Attachment
    }

    async fn exchange(&self, turn: Turn<'_>) -> Result<Option<Content>, AdapterError> {
        let file = turn
            .resource
            .ok_or_else(|| AdapterError::Validation("no CSV file selected".to_string()))?;
        debug!(endpoint = %self.endpoint, file = %file.name, "Sending CSV for analysis");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(file_form(file)?)
            .send()
            .await
            .map_err(transport)?;

        let body: AnalyzeResponse = decode(response).await?;
        Ok(Some(
            Content::text(body.insights).unwrap_or_else(|| Content::Text(NO_INSIGHTS.to_string())),
        ))
    }

    fn failure_text(&self, err: &AdapterError) -> String {
        match err {
            AdapterError::Validation(_) => "Please upload a CSV file first.",
            _ => "Error analyzing file.",
        }
        .to_string()
    }
}
