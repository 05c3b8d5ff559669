// crates/snapask-app/src/dom.rs
// DOM-backed preview surface and file picker for the attachment list

use leptos::html;
use leptos::prelude::*;
use snapask_types::{AttachmentList, DisplayInfo, FilePicker, IconCategory, RenderingSurface};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, File};

/// Class of one preview entry element
pub const ENTRY_CLASS: &str = "attachment-preview";
/// Class of the removal control inside an entry
pub const REMOVE_CLASS: &str = "attachment-remove";
const ENTRY_ID_ATTR: &str = "data-entry-id";

pub type PendingAttachments = AttachmentList<File, DomPreviewList, DomFilePicker>;

pub fn icon_glyph(icon: IconCategory) -> &'static str {
    match icon {
        IconCategory::Image => "🖼️",
        IconCategory::Text => "📄",
        IconCategory::Pdf => "📕",
        IconCategory::Other => "📎",
    }
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

// ============================================================================
// Preview list
// ============================================================================

/// Preview entries are the element children of one container `div`.
/// Each entry carries a numeric id in `data-entry-id`; that id is the handle
/// the attachment list works with.
pub struct DomPreviewList {
    container: NodeRef<html::Div>,
    next_id: u32,
}

impl DomPreviewList {
    pub fn new(container: NodeRef<html::Div>) -> Self {
        Self {
            container,
            next_id: 0,
        }
    }

    fn find(&self, id: u32) -> Option<Element> {
        let container = self.container.get_untracked()?;
        let children = container.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .find(|el| entry_id(el) == Some(id))
    }

    fn build(&self, document: &Document, id: u32, info: &DisplayInfo) -> Result<Element, JsValue> {
        let entry = document.create_element("div")?;
        entry.set_class_name(ENTRY_CLASS);
        entry.set_attribute(ENTRY_ID_ATTR, &id.to_string())?;
        entry.set_attribute("title", &info.full_name)?;

        let icon = document.create_element("span")?;
        icon.set_class_name(&format!("attachment-icon attachment-icon-{}", info.icon.as_str()));
        icon.set_text_content(Some(icon_glyph(info.icon)));

        let name = document.create_element("span")?;
        name.set_class_name("attachment-name");
        name.set_attribute("title", &info.full_name)?;
        name.set_text_content(Some(&info.truncated_name));

        let size = document.create_element("span")?;
        size.set_class_name("attachment-size");
        size.set_text_content(Some(&info.size_text));

        let remove = document.create_element("button")?;
        remove.set_class_name(REMOVE_CLASS);
        remove.set_attribute("type", "button")?;
        remove.set_attribute("title", "Remove")?;
        remove.set_text_content(Some("×"));

        entry.append_child(&icon)?;
        entry.append_child(&name)?;
        entry.append_child(&size)?;
        entry.append_child(&remove)?;
        Ok(entry)
    }
}

impl RenderingSurface for DomPreviewList {
    type Entry = u32;

    fn create_entry(&mut self, info: &DisplayInfo) -> Option<u32> {
        let (Some(document), Some(container)) = (document(), self.container.get_untracked()) else {
            log::error!("Preview container not mounted; {} not rendered", info.full_name);
            return None;
        };

        let id = self.next_id + 1;
        match self
            .build(&document, id, info)
            .and_then(|entry| container.append_child(&entry))
        {
            Ok(_) => {
                self.next_id = id;
                Some(id)
            }
            Err(e) => {
                log::error!("Failed to render preview for {}: {:?}", info.full_name, e);
                None
            }
        }
    }

    fn remove_entry(&mut self, entry: &u32) {
        if let Some(el) = self.find(*entry) {
            el.remove();
        }
    }

    fn entries(&self) -> Vec<u32> {
        let Some(container) = self.container.get_untracked() else {
            return Vec::new();
        };
        let children = container.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .filter_map(|el| entry_id(&el))
            .collect()
    }
}

fn entry_id(el: &Element) -> Option<u32> {
    el.get_attribute(ENTRY_ID_ATTR)?.parse().ok()
}

/// Entry id behind a click on a removal control, if that's what was clicked
pub fn clicked_remove_control(target: &Element) -> Option<u32> {
    target.closest(&format!(".{}", REMOVE_CLASS)).ok().flatten()?;
    let entry = target.closest(&format!(".{}", ENTRY_CLASS)).ok().flatten()?;
    entry_id(&entry)
}

// ============================================================================
// File picker
// ============================================================================

/// Resets the `<input type="file">` so the same files raise a new change event
pub struct DomFilePicker {
    input: NodeRef<html::Input>,
}

impl DomFilePicker {
    pub fn new(input: NodeRef<html::Input>) -> Self {
        Self { input }
    }
}

impl FilePicker for DomFilePicker {
    fn reset_selection(&mut self) {
        if let Some(input) = self.input.get_untracked() {
            input.set_value("");
        }
    }
}
