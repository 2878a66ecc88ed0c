//! Construction of one adapter per feature.

use std::sync::Arc;
use std::time::Duration;

use proto::{AdapterError, Feature};

use crate::adapter::FeatureAdapter;
use crate::chatbot::GenericChatbot;
use crate::data::DataAnalysis;
use crate::document::DocumentChat;
use crate::endpoints::Endpoints;
use crate::http::build_client;
use crate::image::ImageGen;
use crate::webpage::WebpageChat;

/// Produces the adapter a new session should own.
pub trait AdapterFactory: Send + Sync {
    /// Returns the adapter for `feature`.
    fn create(&self, feature: Feature) -> Arc<dyn FeatureAdapter>;
}

/// Builds HTTP-backed adapters sharing a single reqwest client.
#[derive(Clone)]
pub struct HttpAdapters {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpAdapters {
    /// Creates the factory. `timeout` is the optional per-request transport timeout.
    ///
    /// Fails when the HTTP client cannot be built with the requested settings.
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, AdapterError> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoints,
        })
    }

    /// Endpoints used by created adapters.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl AdapterFactory for HttpAdapters {
    fn create(&self, feature: Feature) -> Arc<dyn FeatureAdapter> {
        let client = self.client.clone();
        let e = &self.endpoints;
        match feature {
            Feature::WebpageChat => Arc::new(WebpageChat::new(client, &e.webpage_ask)),
            Feature::DocumentChat => Arc::new(DocumentChat::new(
                client,
                &e.document_upload,
                &e.document_question,
            )),
            Feature::DataAnalysis => Arc::new(DataAnalysis::new(client, &e.data_analyze)),
            Feature::GenericChatbot => Arc::new(GenericChatbot::new(client, &e.chatbot)),
            Feature::ImageGen => Arc::new(ImageGen::new(client, &e.image_generate)),
        }
    }
}
