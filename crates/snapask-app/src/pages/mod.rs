// crates/snapask-app/src/pages/mod.rs
// Page components for snapask

mod chat;

pub use chat::ChatPage;
