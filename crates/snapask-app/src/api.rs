// crates/snapask-app/src/api.rs
// HTTP API functions for communicating with the chat backend

use gloo_net::http::{Request, RequestBuilder};
use snapask_types::transport::{AUDIO_FIELD, FILES_FIELD};
use snapask_types::{
    parse_chat_response, Attachment, ChatAccepted, ChatSubmission, ClientConfig, ModelCatalog,
    TransportError, VoiceUpload,
};
use web_sys::{File, FormData};

/// Endpoint paths, relative to the configured origin
pub const MODELS_PATH: &str = "/api/available_models";
pub const CHAT_PATH: &str = "/chat_with_file";
pub const VOICE_PATH: &str = "/process_voice";

/// Backend origin plus the dashboard token, if one is saved
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, token: Option<String>) -> Self {
        Self { config, token }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    pub async fn fetch_models(&self) -> Result<ModelCatalog, String> {
        let url = self.config.endpoint(MODELS_PATH);
        let resp = self
            .authorized(Request::get(&url))
            .send()
            .await
            .map_err(|e| format!("{:?}", e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| format!("{:?}", e))?;
        if !resp.ok() {
            return Err(format!("Models error ({}): {}", status, body.trim()));
        }

        ModelCatalog::from_json(&body).map_err(|e| e.to_string())
    }

    /// Send prompt, history and files as one multipart request
    pub async fn submit_chat(
        &self,
        submission: &ChatSubmission,
        files: &[Attachment<File>],
    ) -> Result<ChatAccepted, TransportError> {
        let form = form_data(&submission.form_fields()?)?;
        for attachment in files {
            form.append_with_blob_and_filename(FILES_FIELD, &attachment.payload, &attachment.name)
                .map_err(|e| TransportError::Encode(format!("{:?}", e)))?;
        }

        log::debug!(
            "Submitting {} with {} file(s) to {}/{}",
            submission.request_id,
            files.len(),
            submission.provider,
            submission.model_id
        );
        self.post_form(CHAT_PATH, form).await
    }

    /// Send a recorded clip for transcription and chat
    pub async fn upload_voice(
        &self,
        upload: &VoiceUpload,
        clip: &File,
    ) -> Result<ChatAccepted, TransportError> {
        let form = form_data(&upload.form_fields())?;
        let filename = if clip.name().is_empty() {
            "recording.webm".to_string()
        } else {
            clip.name()
        };
        form.append_with_blob_and_filename(AUDIO_FIELD, clip, &filename)
            .map_err(|e| TransportError::Encode(format!("{:?}", e)))?;

        log::debug!("Uploading voice clip {} ({} bytes)", upload.request_id, clip.size());
        self.post_form(VOICE_PATH, form).await
    }

    async fn post_form(&self, path: &str, form: FormData) -> Result<ChatAccepted, TransportError> {
        let url = self.config.endpoint(path);
        let request = self
            .authorized(Request::post(&url))
            .body(form)
            .map_err(|e| TransportError::Encode(format!("{:?}", e)))?;

        let resp = request
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Network(format!("{:?}", e)))?;

        parse_chat_response(status, &body)
    }
}

fn form_data(fields: &[(&'static str, String)]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(|e| TransportError::Encode(format!("{:?}", e)))?;
    for (name, value) in fields {
        form.append_with_str(name, value)
            .map_err(|e| TransportError::Encode(format!("{:?}", e)))?;
    }
    Ok(form)
}
