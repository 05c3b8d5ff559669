// crates/snapask-app/src/files.rs
// Reading user-selected and pasted files

use js_sys::{Function, Promise};
use snapask_types::Attachment;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ClipboardEvent, File, FileList, FileReader};

/// Image pasted into the prompt, kept as a data URL for its thumbnail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastedImage {
    pub id: usize,
    pub name: String,
    pub data_url: String,
}

pub fn attachments_from(list: &FileList) -> Vec<Attachment<File>> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|file| Attachment::new(file.name(), file.size() as u64, file.type_(), file))
        .collect()
}

/// Image files carried by a paste event; text pastes yield nothing
pub fn pasted_image_files(ev: &ClipboardEvent) -> Vec<File> {
    let Some(data) = ev.clipboard_data() else {
        return Vec::new();
    };
    let items = data.items();
    (0..items.length())
        .filter_map(|i| items.get(i))
        .filter(|item| item.kind() == "file" && item.type_().starts_with("image/"))
        .filter_map(|item| item.get_as_file().ok().flatten())
        .collect()
}

pub async fn read_as_data_url(file: &File) -> Result<String, String> {
    let reader = FileReader::new().map_err(|e| format!("FileReader error: {:?}", e))?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let loaded = reader.clone();
        let onload = Closure::once_into_js(move || {
            let result = loaded.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("read failed"));
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader
        .read_as_data_url(file)
        .map_err(|e| format!("FileReader error: {:?}", e))?;

    let value = JsFuture::from(promise)
        .await
        .map_err(|e| format!("Could not read {}: {:?}", file.name(), e))?;
    value
        .as_string()
        .ok_or_else(|| format!("Could not read {}: no data", file.name()))
}
