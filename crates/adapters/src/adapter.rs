//! Shared feature adapter trait.

use async_trait::async_trait;
use proto::{AdapterError, Content, Feature};

use crate::host::HostContext;
use crate::resource::FileHandle;

/// Input a feature needs before it can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Text prompt only.
    None,
    /// A file must be uploaded successfully before questions are accepted.
    UploadFirst,
    /// A file must be selected; it is sent with each request.
    Attachment,
}

impl Requirement {
    /// Whether the feature accepts `select_resource`.
    pub fn takes_resource(self) -> bool {
        !matches!(self, Requirement::None)
    }
}

/// One outbound exchange: the user's text plus whatever context the
/// adapter may need to build its request.
pub struct Turn<'a> {
    /// Prompt or question text (empty for file-driven features).
    pub prompt: &'a str,
    /// Selected file, for [`Requirement::Attachment`] features.
    pub resource: Option<&'a FileHandle>,
    /// Host environment (active tab).
    pub host: &'a dyn HostContext,
}

/// Trait for feature adapters (webpage Q&A, image generation, etc.)
///
/// An adapter is a stateless protocol translator between the uniform
/// message model and a single backend's wire format.
#[async_trait]
pub trait FeatureAdapter: Send + Sync {
    /// The feature this adapter serves.
    fn feature(&self) -> Feature;

    /// Primary endpoint URL requests are sent to.
    fn endpoint(&self) -> &str;

    /// Input the feature requires before `exchange` can succeed.
    fn requirement(&self) -> Requirement {
        Requirement::None
    }

    /// Upload a file ahead of questions ([`Requirement::UploadFirst`] only).
    async fn upload(&self, _file: &FileHandle) -> Result<(), AdapterError> {
        Err(AdapterError::Validation(format!(
            "{} does not accept uploads",
            self.feature()
        )))
    }

    /// Build the request, dispatch it, and parse the response.
    ///
    /// `Ok(None)` means the backend answered but without the expected field.
    async fn exchange(&self, turn: Turn<'_>) -> Result<Option<Content>, AdapterError>;

    /// Bot text shown for a failed exchange.
    fn failure_text(&self, err: &AdapterError) -> String;

    /// Bot text shown after an upload attempt.
    fn upload_notice(&self, outcome: &Result<(), AdapterError>) -> String {
        match outcome {
            Ok(()) => "Document uploaded.".to_string(),
            Err(_) => "Upload failed.".to_string(),
        }
    }

    /// User notice appended when a file is selected.
    fn selection_notice(&self, file: &FileHandle) -> String {
        format!("Selected file: {}", file.name)
    }
}
