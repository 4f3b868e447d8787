mod markdown_vm;

pub use markdown_vm::{markdown_to_html, sanitize_html};
