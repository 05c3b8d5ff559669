// crates/snapask-app/src/components/chat/pasted_images.rs
// Thumbnails of images pasted into the prompt

use leptos::prelude::*;

use crate::files::PastedImage;

#[component]
pub fn PastedImages(
    images: ReadSignal<Vec<PastedImage>>,
    set_images: WriteSignal<Vec<PastedImage>>,
) -> impl IntoView {
    view! {
        <Show when=move || !images.with(|i| i.is_empty())>
            <div class="pasted-images">
                <For
                    each=move || images.get()
                    key=|img| img.id
                    children=move |img| {
                        let id = img.id;
                        view! {
                            <div class="pasted-image" title=img.name.clone()>
                                <img src=img.data_url alt=img.name.clone()/>
                                <button
                                    type="button"
                                    class="attachment-remove"
                                    title="Remove"
                                    on:click=move |_| set_images.update(|list| list.retain(|i| i.id != id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}
