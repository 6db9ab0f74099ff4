//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a button labelled with its shortcut key
pub fn render_shortcut_button(
    frame: &mut Frame,
    area: Rect,
    key: char,
    label: &str,
    is_selected: bool,
) {
    let content = format!("{key} {label}");
    render_button(frame, area, &content, is_selected, true);
}

/// Braille spinner frame for a busy button
pub fn spinner_frame(elapsed_ms: u128) -> char {
    const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    FRAMES[(elapsed_ms / 80 % FRAMES.len() as u128) as usize]
}

/// Render a button that shows a spinner and ignores focus while busy
pub fn render_busy_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    busy_label: &str,
    is_selected: bool,
    busy_for_ms: Option<u128>,
) {
    match busy_for_ms {
        Some(elapsed) => {
            let content = format!("{} {busy_label}", spinner_frame(elapsed));
            render_button(frame, area, &content, false, false);
        }
        None => render_button(frame, area, label, is_selected, true),
    }
}
