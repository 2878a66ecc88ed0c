//! Backend endpoint URLs.

use serde::{Deserialize, Serialize};

const WEBPAGE_ASK_URL: &str = "http://127.0.0.1:8003/ask";
const DOCUMENT_UPLOAD_URL: &str = "http://127.0.0.1:8000/upload";
const DOCUMENT_QUESTION_URL: &str = "http://127.0.0.1:8000/question";
const DATA_ANALYZE_URL: &str = "http://127.0.0.1:8002/analyze-csv/";
const CHATBOT_URL: &str = "https://apichatbotrax.vercel.app/api/ask";
const IMAGE_GENERATE_URL: &str = "http://127.0.0.1:8000/generate-image";

/// Full URL of every backend endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Webpage Q&A (`/ask`).
    pub webpage_ask: String,
    /// Document upload (`/upload`).
    pub document_upload: String,
    /// Document question (`/question`).
    pub document_question: String,
    /// CSV analysis (`/analyze-csv/`).
    pub data_analyze: String,
    /// Remote chatbot.
    pub chatbot: String,
    /// Image generation (`/generate-image`).
    pub image_generate: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            webpage_ask: WEBPAGE_ASK_URL.to_string(),
            document_upload: DOCUMENT_UPLOAD_URL.to_string(),
            document_question: DOCUMENT_QUESTION_URL.to_string(),
            data_analyze: DATA_ANALYZE_URL.to_string(),
            chatbot: CHATBOT_URL.to_string(),
            image_generate: IMAGE_GENERATE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every local endpoint at `base` (e.g. a test server), keeping
    /// the standard paths. The remote chatbot becomes `{base}/api/ask`.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            webpage_ask: format!("{base}/ask"),
            document_upload: format!("{base}/upload"),
            document_question: format!("{base}/question"),
            data_analyze: format!("{base}/analyze-csv/"),
            chatbot: format!("{base}/api/ask"),
            image_generate: format!("{base}/generate-image"),
        }
    }
}
