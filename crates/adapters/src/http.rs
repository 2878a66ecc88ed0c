//! reqwest plumbing shared by the HTTP adapters.

use std::time::Duration;

use proto::AdapterError;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::resource::FileHandle;

/// Builds the shared client. `timeout` bounds each whole request.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, AdapterError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| {
        warn!(error = %e, "Could not build HTTP client");
        AdapterError::Transport(format!("http client: {e}"))
    })
}

pub(crate) fn transport(err: reqwest::Error) -> AdapterError {
    AdapterError::Transport(err.to_string())
}

/// Rejects non-2xx responses with [`AdapterError::HttpStatus`].
pub(crate) fn require_success(response: &reqwest::Response) -> Result<(), AdapterError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(AdapterError::HttpStatus(status.as_u16()))
    }
}

/// Decodes a JSON body, regardless of status code.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AdapterError> {
    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        debug!(error = %e, body = %preview, "Undecodable backend response");
        AdapterError::Transport(format!("invalid response body: {e}"))
    })
}

/// Multipart form with the file under the `file` field.
pub(crate) fn file_form(file: &FileHandle) -> Result<Form, AdapterError> {
    let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
    if let Some(mime) = &file.mime {
        part = part.mime_str(mime).map_err(transport)?;
    }
    Ok(Form::new().part("file", part))
}
