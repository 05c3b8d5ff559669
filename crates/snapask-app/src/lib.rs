// crates/snapask-app/src/lib.rs
// snapask - Leptos WASM chat composer (CSR)

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use snapask_types::ClientConfig;
use wasm_bindgen::prelude::*;

pub mod api;
pub mod components;
pub mod dom;
pub mod files;
pub mod pages;
pub mod storage;

use components::NotFound;
use pages::ChatPage;

// ============================================================================
// WASM Entry Point
// ============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    // Set up better panic messages
    console_error_panic_hook::set_once();

    // Initialize logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("snapask starting...");

    leptos::mount::mount_to_body(App);
}

/// Backend origin derived from the page location
fn client_config() -> ClientConfig {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location.as_ref().and_then(|l| l.protocol().ok());
    let host = location.as_ref().and_then(|l| l.host().ok());

    match (protocol, host) {
        (Some(protocol), Some(host)) => ClientConfig::from_location(&protocol, &host),
        _ => {
            log::warn!("No page location; using relative API paths");
            ClientConfig::default()
        }
    }
}

// ============================================================================
// App Root
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = client_config();
    log::debug!("API base: {:?}", config.api_base);
    provide_context(config);

    view! {
        <Title text="snapask"/>
        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=path!("/") view=ChatPage/>
            </Routes>
        </Router>
    }
}
