//! UI module for rendering the TUI

mod article;
mod components;
mod forms;
mod layout;
pub mod subscribe;

use crate::app::App;
use crate::state::View;
use components::render_notice;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let now = Instant::now();
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::Subscribe => subscribe::draw(frame, main_area, app, now),
        View::Article => article::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Share notice floats over everything
    if let Some(notice) = app.share.notice() {
        render_notice(frame, notice, now);
    }
}
