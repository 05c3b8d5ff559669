// crates/snapask-app/src/components/chat/mod.rs
// Chat component re-exports

mod message_line;
mod model_picker;
mod pasted_images;

pub use message_line::{ChatLine, LineKind, MessageLine};
pub use model_picker::ModelPicker;
pub use pasted_images::PastedImages;
