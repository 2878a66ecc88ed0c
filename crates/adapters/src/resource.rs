//! File selected by the user for upload or analysis.

use std::path::Path;

use proto::AdapterError;

/// In-memory copy of a user-selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// File name sent as the multipart filename.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// MIME type, when known.
    pub mime: Option<String>,
}

impl FileHandle {
    /// Creates a handle from raw bytes, guessing the MIME type from the name.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = guess_mime(&name).map(str::to_string);
        Self { name, bytes, mime }
    }

    /// Reads a file from disk.
    pub async fn from_path(path: &Path) -> Result<Self, AdapterError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AdapterError::Validation(format!("not a file path: {}", path.display()))
            })?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AdapterError::Validation(format!("{}: {e}", path.display())))?;
        Ok(Self::new(name, bytes))
    }
}

fn guess_mime(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "csv" => Some("text/csv"),
        "txt" => Some("text/plain"),
        "md" => Some("text/markdown"),
        "pdf" => Some("application/pdf"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}
