// crates/snapask-types/src/transport.rs
// Request payloads for the chat backend and classification of its responses

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ChatTurn;

/// Multipart part name carrying attached files
pub const FILES_FIELD: &str = "files";
/// Multipart part name carrying a recorded voice clip
pub const AUDIO_FIELD: &str = "audio";

/// Failure of one request/response exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The backend answered with a non-success status
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The backend answered 2xx but the body could not be understood
    #[error("malformed response: {0}")]
    MalformedBody(String),

    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The request body could not be assembled
    #[error("could not encode request: {0}")]
    Encode(String),

    /// Nothing to send
    #[error("nothing to send")]
    EmptySubmission,
}

impl TransportError {
    pub fn is_server_reported(&self) -> bool {
        matches!(self, TransportError::Server { .. })
    }

    /// Text for the system message shown in the chat log
    pub fn system_message(&self) -> String {
        match self {
            TransportError::Server { status, message } => {
                format!("Server reported an error ({}): {}", status, message)
            }
            TransportError::MalformedBody(detail) => {
                format!("Request failed: could not read the server response ({})", detail)
            }
            TransportError::Network(detail) => format!("Request failed: {}", detail),
            TransportError::Encode(detail) => {
                format!("Request failed: could not encode the request ({})", detail)
            }
            TransportError::EmptySubmission => {
                "Type a message or attach a file before sending.".to_string()
            }
        }
    }
}

/// Acknowledgement returned by the backend for an accepted request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatAccepted {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Encode(err.to_string())
    }
}

impl ChatAccepted {
    pub fn summary(&self) -> String {
        let text = self
            .message
            .clone()
            .or_else(|| self.status.clone())
            .unwrap_or_else(|| "Request accepted".to_string());
        match &self.request_id {
            Some(id) => format!("{} [{}]", text, id),
            None => text,
        }
    }
}

/// Everything one send carries besides the files themselves
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSubmission {
    pub request_id: String,
    pub prompt: String,
    pub history: Vec<ChatTurn>,
    /// Raw base64 payloads, data-URL prefix already stripped
    pub pasted_images: Vec<String>,
    pub model_id: String,
    pub provider: String,
    pub streaming: bool,
}

impl ChatSubmission {
    /// True when there is no text, no file and no pasted image
    pub fn is_empty(&self, attachment_count: usize) -> bool {
        self.prompt.trim().is_empty() && attachment_count == 0 && self.pasted_images.is_empty()
    }

    /// Chat-log text for a sent request: the prompt plus what rode along with it
    pub fn outgoing_summary(&self, attachment_count: usize) -> String {
        let prompt = self.prompt.trim();
        let mut extras = Vec::new();
        if attachment_count > 0 {
            extras.push(format!("{} file(s)", attachment_count));
        }
        if !self.pasted_images.is_empty() {
            extras.push(format!("{} pasted image(s)", self.pasted_images.len()));
        }
        match (prompt.is_empty(), extras.is_empty()) {
            (_, true) => prompt.to_string(),
            (true, false) => format!("[{}]", extras.join(", ")),
            (false, false) => format!("{}\n[{}]", prompt, extras.join(", ")),
        }
    }

    /// Text parts of the multipart body, in send order
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("request_id", self.request_id.clone()),
            ("prompt", self.prompt.trim().to_string()),
            ("history", serde_json::to_string(&self.history)?),
            ("model_id", self.model_id.clone()),
            ("provider", self.provider.clone()),
            ("use_streaming", self.streaming.to_string()),
            (
                "pasted_images_base64_json_array",
                serde_json::to_string(&self.pasted_images)?,
            ),
        ])
    }
}

/// What one send took from the composer. The composer stays editable while
/// the request is in flight, so a success clears only these parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentDraft {
    pub prompt: String,
    pub image_ids: Vec<usize>,
}

impl SentDraft {
    pub fn new(prompt: impl Into<String>, image_ids: impl IntoIterator<Item = usize>) -> Self {
        Self {
            prompt: prompt.into(),
            image_ids: image_ids.into_iter().collect(),
        }
    }

    /// Prompt to leave in the composer: emptied if untouched since the send,
    /// otherwise the user's newer text is kept as is
    pub fn prompt_after_success(&self, current: &str) -> String {
        if current == self.prompt {
            String::new()
        } else {
            current.to_string()
        }
    }

    pub fn was_sent(&self, image_id: usize) -> bool {
        self.image_ids.contains(&image_id)
    }
}

/// One recorded clip for speech-to-text followed by chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceUpload {
    pub request_id: String,
    pub model_id: String,
    pub provider: String,
    pub stt_provider: Option<String>,
}

impl VoiceUpload {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("request_id", self.request_id.clone()),
            ("model_id", self.model_id.clone()),
            ("provider", self.provider.clone()),
        ];
        if let Some(stt) = self.stt_provider.as_ref().filter(|s| !s.trim().is_empty()) {
            fields.push(("stt_provider", stt.clone()));
        }
        fields
    }
}

/// `data:image/png;base64,AAAA` -> `AAAA`; raw base64 passes through
pub fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some((_, payload)) = data.split_once(',') {
            return payload;
        }
    }
    data
}

/// Classify a completed exchange by status and body
pub fn parse_chat_response(status: u16, body: &str) -> Result<ChatAccepted, TransportError> {
    if (200..300).contains(&status) {
        return match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) if value.is_object() => serde_json::from_value(value)
                .map_err(|e| TransportError::MalformedBody(e.to_string())),
            Ok(_) => Err(TransportError::MalformedBody(
                "expected a JSON object".to_string(),
            )),
            Err(e) => Err(TransportError::MalformedBody(e.to_string())),
        };
    }

    Err(TransportError::Server {
        status,
        message: server_message(status, body),
    })
}

fn server_message(status: u16, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.error.or(parsed.message).filter(|m| !m.trim().is_empty()) {
            return msg;
        }
    }

    let text = body.trim();
    if text.is_empty() {
        format!("HTTP {}", status)
    } else {
        text.to_string()
    }
}
