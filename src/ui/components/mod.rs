//! Reusable UI components

mod button;
mod toast;

pub use button::{render_busy_button, render_shortcut_button, BUTTON_HEIGHT};
pub use toast::{alert_height, render_alert, render_notice, severity_color};
