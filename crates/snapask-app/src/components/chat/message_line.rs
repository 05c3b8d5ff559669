// crates/snapask-app/src/components/chat/message_line.rs
// One entry in the chat log

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    User,
    System,
    Error,
}

impl LineKind {
    fn class(self) -> &'static str {
        match self {
            LineKind::User => "message user",
            LineKind::System => "message system",
            LineKind::Error => "message error",
        }
    }

    fn label(self) -> &'static str {
        match self {
            LineKind::User => "You",
            LineKind::System => "System",
            LineKind::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub id: usize,
    pub kind: LineKind,
    pub text: String,
    pub timestamp: String,
}

impl ChatLine {
    pub fn new(id: usize, kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            text: text.into(),
            timestamp: clock_now(),
        }
    }
}

fn clock_now() -> String {
    let date = js_sys::Date::new_0();
    format!("{:02}:{:02}", date.get_hours(), date.get_minutes())
}

#[component]
pub fn MessageLine(line: ChatLine) -> impl IntoView {
    view! {
        <div class=line.kind.class()>
            <div class="message-header">
                <span class="message-role">{line.kind.label()}</span>
                <span class="message-time">{line.timestamp}</span>
            </div>
            <div class="message-body">{line.text}</div>
        </div>
    }
}
