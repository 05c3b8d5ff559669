// crates/snapask-app/src/components.rs
// Page shell and button helpers

use leptos::prelude::*;

pub mod chat;

// ============================================================================
// Page shell
// ============================================================================

/// App bar with the name and a page caption, then the page body filling the
/// rest of the viewport
#[component]
pub fn Layout(#[prop(optional, into)] caption: Option<String>, children: Children) -> impl IntoView {
    view! {
        <div class="app-shell">
            <header class="app-bar">
                <a href="/" class="app-name">"snapask"</a>
                {caption.map(|text| view! { <span class="app-caption">{text}</span> })}
            </header>
            <main class="app-body">{children()}</main>
        </div>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <Layout caption="Unknown page">
            <div class="empty-state">
                <p>"Nothing to compose at this address."</p>
                <a href="/" class="empty-state-link">"Open the composer"</a>
            </div>
        </Layout>
    }
}

// ============================================================================
// Buttons
// ============================================================================

/// Small square button with a glyph and a tooltip
#[component]
pub fn IconButton(
    icon: &'static str,
    title: &'static str,
    #[prop(optional, into)] disabled: Signal<bool>,
    on_click: impl FnMut(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="icon-btn"
            title=title
            prop:disabled=move || disabled.get()
            on:click=on_click
        >
            {icon}
        </button>
    }
}

/// Labelled action button; `primary` gives it the accent style
#[component]
pub fn ActionButton(
    label: &'static str,
    #[prop(default = false)] primary: bool,
    #[prop(optional, into)] disabled: Signal<bool>,
    on_click: impl FnMut(web_sys::MouseEvent) + 'static,
) -> impl IntoView {
    let class = if primary { "action-btn primary" } else { "action-btn" };

    view! {
        <button
            type="button"
            class=class
            prop:disabled=move || disabled.get()
            on:click=on_click
        >
            {label}
        </button>
    }
}
