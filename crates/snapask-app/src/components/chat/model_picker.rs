// crates/snapask-app/src/components/chat/model_picker.rs
// Provider-grouped model dropdown

use leptos::prelude::*;
use snapask_types::{ModelCatalog, ModelSelection};

const SEPARATOR: &str = "::";

fn option_value(provider: &str, model_id: &str) -> String {
    format!("{}{}{}", provider, SEPARATOR, model_id)
}

fn parse_option_value(value: &str) -> Option<ModelSelection> {
    let (provider, model_id) = value.split_once(SEPARATOR)?;
    Some(ModelSelection {
        provider: provider.to_string(),
        model_id: model_id.to_string(),
    })
}

#[component]
pub fn ModelPicker(
    #[prop(into)] catalog: Signal<ModelCatalog>,
    #[prop(into)] selection: Signal<Option<ModelSelection>>,
    #[prop(optional, into)] disabled: Signal<bool>,
    on_select: impl Fn(ModelSelection) + 'static,
) -> impl IntoView {
    let current = move || {
        selection
            .get()
            .map(|s| option_value(&s.provider, &s.model_id))
            .unwrap_or_default()
    };

    view! {
        <select
            class="model-select"
            title="Model"
            prop:disabled=move || disabled.get() || catalog.with(|c| c.is_empty())
            on:change=move |ev| {
                if let Some(choice) = parse_option_value(&event_target_value(&ev)) {
                    on_select(choice);
                }
            }
        >
            {move || {
                if catalog.with(|c| c.is_empty()) {
                    return view! { <option value="">"No models available"</option> }.into_any();
                }
                let selected = current();
                catalog
                    .get()
                    .providers
                    .into_iter()
                    .map(|group| {
                        let provider = group.provider.clone();
                        view! {
                            <optgroup label=group.provider>
                                {group
                                    .models
                                    .into_iter()
                                    .map(|model| {
                                        let value = option_value(&provider, &model.id);
                                        let is_selected = value == selected;
                                        view! {
                                            <option value=value selected=is_selected>
                                                {model.label}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </optgroup>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </select>
    }
}
