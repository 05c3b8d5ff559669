// crates/snapask-app/src/pages/chat.rs
// Chat page - prompt, attachments, pasted images and voice clips

use leptos::html;
use leptos::prelude::*;
use gloo_timers::future::TimeoutFuture;
use snapask_types::storage::{
    auth_token, load, save, save_raw, AUTH_TOKEN_KEY, MODEL_SELECTION_KEY, STREAMING_KEY,
};
use snapask_types::{
    strip_data_url, ChatSubmission, ChatTurn, ClientConfig, ModelCatalog, ModelSelection,
    Removal, SentDraft, TransportError, VoiceUpload,
};
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, Element, Event, HtmlInputElement, KeyboardEvent, MouseEvent};

use crate::api::ApiClient;
use crate::components::chat::{ChatLine, LineKind, MessageLine, ModelPicker, PastedImages};
use crate::components::{ActionButton, IconButton, Layout};
use crate::dom::{clicked_remove_control, DomFilePicker, DomPreviewList, PendingAttachments};
use crate::files::{attachments_from, pasted_image_files, read_as_data_url, PastedImage};
use crate::storage::SettingsStore;

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ═══════════════════════════════════════
// CHAT PAGE COMPONENT
// ═══════════════════════════════════════

#[component]
pub fn ChatPage() -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let toast_ms = config.toast_ms;
    let settings = StoredValue::new_local(SettingsStore::open());

    // Chat log
    let (lines, set_lines) = signal(Vec::<ChatLine>::new());
    let (history, set_history) = signal(Vec::<ChatTurn>::new());
    let (notice, set_notice) = signal(Option::<String>::None);

    // Composer state
    let (prompt, set_prompt) = signal(String::new());
    let (pasted, set_pasted) = signal(Vec::<PastedImage>::new());
    let (pasted_counter, set_pasted_counter) = signal(0usize);
    let (attached, set_attached) = signal(0usize);
    let (sending, set_sending) = signal(false);

    let preview_ref = NodeRef::<html::Div>::new();
    let file_input_ref = NodeRef::<html::Input>::new();
    let voice_input_ref = NodeRef::<html::Input>::new();
    let messages_ref = NodeRef::<html::Div>::new();

    // File handles are not Send, so the list lives in local storage
    let tray = StoredValue::new_local(PendingAttachments::new(
        DomPreviewList::new(preview_ref),
        DomFilePicker::new(file_input_ref),
    ));

    // Settings
    let initial_streaming =
        settings.with_value(|s| load(s, STREAMING_KEY, config.default_streaming));
    let initial_token = settings.with_value(|s| auth_token(s)).unwrap_or_default();
    let (streaming, set_streaming) = signal(initial_streaming);
    let (token, set_token) = signal(initial_token);
    let (catalog, set_catalog) = signal(ModelCatalog::default());
    let (selection, set_selection) = signal(Option::<ModelSelection>::None);

    let config = StoredValue::new(config);
    let client = move || ApiClient::new(config.get_value(), non_blank(token.get_untracked()));

    // ═══════════════════════════════════════
    // HELPERS
    // ═══════════════════════════════════════

    let push_line = move |kind: LineKind, text: String| {
        set_lines.update(|lines| {
            let id = lines.len();
            lines.push(ChatLine::new(id, kind, text));
        });
    };

    let show_notice = move |text: String| {
        set_notice.set(Some(text.clone()));
        spawn_local(async move {
            TimeoutFuture::new(toast_ms).await;
            set_notice.update(|current| {
                if current.as_deref() == Some(text.as_str()) {
                    *current = None;
                }
            });
        });
    };

    let sync_attached = move || {
        set_attached.set(tray.try_with_value(|t| t.len()).unwrap_or(0));
    };

    let load_models = move || {
        spawn_local(async move {
            match client().fetch_models().await {
                Ok(fetched) => {
                    let preferred: Option<ModelSelection> =
                        settings.with_value(|s| load(s, MODEL_SELECTION_KEY, None));
                    let resolved = fetched.resolve(preferred.as_ref());
                    log::info!(
                        "Loaded {} provider(s), using {:?}",
                        fetched.providers.len(),
                        resolved
                    );
                    set_selection.set(resolved);
                    set_catalog.set(fetched);
                }
                Err(e) => {
                    log::warn!("Model list failed: {}", e);
                    push_line(LineKind::Error, format!("Could not load models: {}", e));
                }
            }
        });
    };

    // Load models on mount
    Effect::new(move |_| load_models());

    // Auto-scroll on new lines
    Effect::new(move |_| {
        let _ = lines.get();
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    // ═══════════════════════════════════════
    // ATTACHMENTS
    // ═══════════════════════════════════════

    let on_files_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(list) = input.files() else {
            return;
        };
        let batch = attachments_from(&list);
        let offered = batch.len();
        let accepted = tray.try_update_value(|t| t.add_selection(batch)).unwrap_or(0);
        sync_attached();

        let skipped = offered.saturating_sub(accepted);
        if skipped > 0 {
            show_notice(format!("Skipped {} file(s) already attached", skipped));
        }
    };

    // One listener on the container serves every preview's remove button
    let on_preview_click = move |ev: MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some(entry) = clicked_remove_control(&target) else {
            return;
        };
        match tray.try_update_value(|t| t.remove_entry(&entry)) {
            Some(Removal::Removed(attachment)) => log::debug!("Removed {}", attachment.name),
            Some(Removal::Skewed { .. }) | Some(Removal::NotRendered) | None => {}
        }
        sync_attached();
    };

    let on_paste = move |ev: ClipboardEvent| {
        for file in pasted_image_files(&ev) {
            set_pasted_counter.update(|c| *c += 1);
            let id = pasted_counter.get_untracked();
            spawn_local(async move {
                match read_as_data_url(&file).await {
                    Ok(data_url) => {
                        let name = if file.name().is_empty() {
                            format!("pasted-{}.png", id)
                        } else {
                            file.name()
                        };
                        set_pasted.update(|images| images.push(PastedImage { id, name, data_url }));
                    }
                    Err(e) => push_line(LineKind::Error, e),
                }
            });
        }
    };

    let clear_composer = move |_: MouseEvent| {
        let _ = tray.try_update_value(|t| t.reset());
        set_pasted.set(Vec::new());
        sync_attached();
    };

    // ═══════════════════════════════════════
    // SENDING
    // ═══════════════════════════════════════

    let send_message = move || {
        if sending.get_untracked() {
            return;
        }
        let Some(choice) = selection.get_untracked() else {
            show_notice("Pick a model before sending.".to_string());
            return;
        };

        let submission = ChatSubmission {
            request_id: Uuid::new_v4().to_string(),
            prompt: prompt.get_untracked(),
            history: history.get_untracked(),
            pasted_images: pasted.with_untracked(|images| {
                images
                    .iter()
                    .map(|img| strip_data_url(&img.data_url).to_string())
                    .collect()
            }),
            model_id: choice.model_id,
            provider: choice.provider,
            streaming: streaming.get_untracked(),
        };
        let draft = SentDraft::new(
            submission.prompt.clone(),
            pasted.with_untracked(|images| images.iter().map(|img| img.id).collect::<Vec<_>>()),
        );
        let files = tray
            .try_with_value(|t| t.attachments().to_vec())
            .unwrap_or_default();

        if submission.is_empty(files.len()) {
            show_notice(TransportError::EmptySubmission.system_message());
            return;
        }

        let client = client();
        set_sending.set(true);
        spawn_local(async move {
            match client.submit_chat(&submission, &files).await {
                Ok(accepted) => {
                    log::info!("Request {} accepted", submission.request_id);
                    push_line(LineKind::User, submission.outgoing_summary(files.len()));
                    let text = submission.prompt.trim().to_string();
                    push_line(LineKind::System, accepted.summary());
                    if !text.is_empty() {
                        set_history.update(|h| h.push(ChatTurn::user(text)));
                    }

                    // Text typed and images pasted while in flight stay for the next send
                    set_prompt.update(|current| *current = draft.prompt_after_success(current));
                    set_pasted.update(|images| images.retain(|img| !draft.was_sent(img.id)));
                    // Attaching is disabled while sending, so the list holds only sent files
                    let _ = tray.try_update_value(|t| t.reset());
                    sync_attached();
                }
                Err(e) => {
                    // Composer keeps its state so the user can retry
                    log::warn!("Request {} failed: {}", submission.request_id, e);
                    push_line(LineKind::Error, e.system_message());
                }
            }
            set_sending.set(false);
        });
    };

    let on_voice_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(clip) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        input.set_value("");

        let Some(choice) = selection.get_untracked() else {
            show_notice("Pick a model before sending.".to_string());
            return;
        };
        let upload = VoiceUpload {
            request_id: Uuid::new_v4().to_string(),
            model_id: choice.model_id,
            provider: choice.provider,
            stt_provider: None,
        };

        let client = client();
        set_sending.set(true);
        spawn_local(async move {
            match client.upload_voice(&upload, &clip).await {
                Ok(accepted) => {
                    push_line(LineKind::User, format!("🎤 {}", clip.name()));
                    push_line(LineKind::System, accepted.summary());
                }
                Err(e) => {
                    log::warn!("Voice upload {} failed: {}", upload.request_id, e);
                    push_line(LineKind::Error, e.system_message());
                }
            }
            set_sending.set(false);
        });
    };

    // ═══════════════════════════════════════
    // SETTINGS
    // ═══════════════════════════════════════

    let on_model_select = move |choice: ModelSelection| {
        settings.with_value(|s| {
            save(s, MODEL_SELECTION_KEY, &choice);
        });
        set_selection.set(Some(choice));
    };

    let on_streaming_change = move |ev: Event| {
        let enabled = event_target_checked(&ev);
        settings.with_value(|s| {
            save(s, STREAMING_KEY, &enabled);
        });
        set_streaming.set(enabled);
    };

    let on_token_change = move |ev: Event| {
        let value = event_target_value(&ev);
        settings.with_value(|s| {
            save_raw(s, AUTH_TOKEN_KEY, value.trim());
        });
        set_token.set(value);
        load_models();
    };

    view! {
        <Layout caption="Ask about screenshots and files">
            <div class="chat-page flex-1 flex flex-col bg-background">
                // Header: model, streaming, token
                <div class="chat-header">
                    <ModelPicker
                        catalog=catalog
                        selection=selection
                        disabled=sending
                        on_select=on_model_select
                    />
                    <label class="streaming-toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || streaming.get()
                            on:change=on_streaming_change
                        />
                        "Stream"
                    </label>
                    <input
                        type="password"
                        class="token-input"
                        placeholder="Dashboard token"
                        prop:value=move || token.get()
                        on:change=on_token_change
                    />
                </div>

                // Messages Area
                <div class="flex-1 overflow-y-auto" node_ref=messages_ref>
                    <div class="chat-container">
                        <For
                            each=move || lines.get()
                            key=|line| line.id
                            children=move |line| view! { <MessageLine line=line/> }
                        />
                    </div>
                </div>

                {move || notice.get().map(|text| view! { <div class="toast">{text}</div> })}

                // Input Area
                <div class="chat-input-area">
                    // Children are managed by DomPreviewList, not by the view
                    <div
                        class="attachment-previews"
                        node_ref=preview_ref
                        on:click=on_preview_click
                    ></div>
                    <PastedImages images=pasted set_images=set_pasted/>

                    <div class="chat-input-wrapper">
                        <input
                            type="file"
                            multiple=true
                            class="hidden"
                            node_ref=file_input_ref
                            on:change=on_files_change
                        />
                        <input
                            type="file"
                            accept="audio/*"
                            class="hidden"
                            node_ref=voice_input_ref
                            on:change=on_voice_change
                        />
                        <IconButton
                            icon="📎"
                            title="Attach files"
                            disabled=sending
                            on_click=move |_: MouseEvent| {
                                if let Some(input) = file_input_ref.get_untracked() {
                                    input.click();
                                }
                            }
                        />
                        <IconButton
                            icon="🎤"
                            title="Send a voice clip"
                            disabled=sending
                            on_click=move |_: MouseEvent| {
                                if let Some(input) = voice_input_ref.get_untracked() {
                                    input.click();
                                }
                            }
                        />
                        <textarea
                            class="chat-input"
                            rows="2"
                            placeholder="Ask about a screenshot or file..."
                            prop:value=move || prompt.get()
                            on:input=move |ev| set_prompt.set(event_target_value(&ev))
                            on:paste=on_paste
                            on:keydown=move |ev: KeyboardEvent| {
                                if ev.key() == "Enter" && !ev.shift_key() {
                                    ev.prevent_default();
                                    send_message();
                                }
                            }
                        ></textarea>
                        <ActionButton
                            label="Clear"
                            disabled=Signal::derive(move || {
                                sending.get() || (attached.get() == 0 && pasted.with(|p| p.is_empty()))
                            })
                            on_click=clear_composer
                        />
                        <ActionButton
                            label="Send"
                            primary=true
                            disabled=sending
                            on_click=move |_: MouseEvent| send_message()
                        />
                    </div>

                    <div class="attachment-count text-xs text-muted">
                        {move || match attached.get() {
                            0 => String::new(),
                            1 => "1 file attached".to_string(),
                            n => format!("{} files attached", n),
                        }}
                    </div>
                </div>
            </div>
        </Layout>
    }
}
