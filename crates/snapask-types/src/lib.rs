// crates/snapask-types/src/lib.rs
// Shared composer state and wire types for snapask (native + WASM compatible)
// No browser-only dependencies allowed here

use serde::{Deserialize, Serialize};

pub mod attachment;
pub mod composer;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod transport;

pub use attachment::{format_size, truncate_name, Attachment, DisplayInfo, IconCategory};
pub use composer::{AttachmentList, FilePicker, Removal, RenderingSurface};
pub use config::ClientConfig;
pub use error::{Result, SnapaskError};
pub use models::{CatalogError, ModelCatalog, ModelOption, ModelSelection, ProviderModels};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use transport::{
    parse_chat_response, strip_data_url, ChatAccepted, ChatSubmission, SentDraft,
    TransportError, VoiceUpload,
};

// ═══════════════════════════════════════
// CONVERSATION HISTORY
// ═══════════════════════════════════════

/// Who produced a turn in the conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One prior turn, sent back to the backend as conversation history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
