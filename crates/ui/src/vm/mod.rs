mod export_vm;
mod markdown_vm;
mod messages;
mod selection_vm;

pub use export_vm::{lesson_markdown, summary_markdown};
pub use markdown_vm::markdown_to_html;
pub use messages::{
    flow_error_message, CLIPBOARD_ERROR, CORRUPT_CONFIG_REDIRECT, MISSING_CONFIG_REDIRECT,
};
pub use selection_vm::TechSelection;
