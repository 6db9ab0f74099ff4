//! Form rendering module
//!
//! Text fields with their inline notes, checkboxes and help text.

mod field_renderer;

pub use field_renderer::{draw_checkbox, draw_field, draw_field_note, draw_help_text};
