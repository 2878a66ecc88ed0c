use std::collections::VecDeque;
use std::sync::Arc;

use adapters::{
    AdapterFactory, FeatureAdapter, FileHandle, HostContext, Requirement, StaticHost, Turn,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use proto::{AdapterError, Content, Feature};
use tokio::sync::Notify;

/// Pair of signals letting a test observe an exchange mid-flight.
#[derive(Default)]
pub(crate) struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Adapter replaying canned results and recording what it was asked.
pub(crate) struct ScriptedAdapter {
    feature: Feature,
    replies: Mutex<VecDeque<Result<Option<Content>, AdapterError>>>,
    upload_result: Result<(), AdapterError>,
    calls: Arc<Mutex<Vec<String>>>,
    uploads: Arc<Mutex<Vec<String>>>,
    gate: Option<Arc<Gate>>,
}

impl ScriptedAdapter {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            replies: Mutex::new(VecDeque::new()),
            upload_result: Ok(()),
            calls: Arc::new(Mutex::new(Vec::new())),
            uploads: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn reply(self, result: Result<Option<Content>, AdapterError>) -> Self {
        self.replies.lock().push_back(result);
        self
    }

    pub fn upload_result(mut self, result: Result<(), AdapterError>) -> Self {
        self.upload_result = result;
        self
    }

    /// Makes `exchange` and `upload` wait for `Gate::release` after signalling
    /// `Gate::entered`.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Gate::default()));
        self
    }

    pub fn gate(&self) -> Arc<Gate> {
        self.gate.clone().expect("adapter is not gated")
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    pub fn uploads(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.uploads)
    }
}

#[async_trait]
impl FeatureAdapter for ScriptedAdapter {
    fn feature(&self) -> Feature {
        self.feature
    }

    fn endpoint(&self) -> &str {
        "scripted://"
    }

    fn requirement(&self) -> Requirement {
        match self.feature {
            Feature::DocumentChat => Requirement::UploadFirst,
            Feature::DataAnalysis => Requirement::Attachment,
            _ => Requirement::None,
        }
    }

    async fn upload(&self, file: &FileHandle) -> Result<(), AdapterError> {
        self.uploads.lock().push(file.name.clone());
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.upload_result.clone()
    }

    async fn exchange(&self, turn: Turn<'_>) -> Result<Option<Content>, AdapterError> {
        let call = match turn.resource {
            Some(file) => format!("file:{}", file.name),
            None => turn.prompt.to_string(),
        };
        self.calls.lock().push(call);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Some(Content::Text("ok".to_string()))))
    }

    fn failure_text(&self, err: &AdapterError) -> String {
        format!("failure: {err}")
    }
}

/// Factory building fresh scripted adapters with default replies.
pub(crate) struct ScriptedFactory;

impl AdapterFactory for ScriptedFactory {
    fn create(&self, feature: Feature) -> Arc<dyn FeatureAdapter> {
        Arc::new(ScriptedAdapter::new(feature))
    }
}

pub(crate) fn host() -> Arc<dyn HostContext> {
    Arc::new(StaticHost::new(Some("https://example.com".to_string())))
}
