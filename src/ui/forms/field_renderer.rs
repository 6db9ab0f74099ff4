//! Field rendering utilities for forms

use crate::state::{CategoryOption, FormField, Severity};
use crate::ui::components::severity_color;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a text field; the border turns red while the field carries an error
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = if field.is_invalid() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_str = if field.value.is_empty() && !is_active {
        "(vazio)"
    } else {
        field.as_text()
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let mut block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if is_active {
        block = block.title_style(Style::default().add_modifier(Modifier::BOLD));
    }

    frame.render_widget(content.block(block), area);
}

/// One line under a field: the inline error, else the informational hint
pub fn draw_field_note(frame: &mut Frame, area: Rect, field: &FormField) {
    let line = match (&field.error, &field.hint) {
        (Some(error), _) => Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        )),
        (None, Some(hint)) => Line::from(Span::styled(
            format!(" {} {hint}", Severity::Info.icon()),
            Style::default().fg(severity_color(Severity::Info)),
        )),
        (None, None) => return,
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a category checkbox; checked items get the selected background
pub fn draw_checkbox(frame: &mut Frame, area: Rect, option: &CategoryOption, is_active: bool) {
    let mark = if option.checked { "[x]" } else { "[ ]" };
    let mut style = if option.checked {
        Style::default().fg(Color::White).bg(Color::Blue)
    } else {
        Style::default()
    };
    if is_active {
        style = style.add_modifier(Modifier::BOLD).fg(Color::Cyan);
    }
    let pointer = if is_active { "›" } else { " " };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{pointer} {mark} {}", option.label),
            style,
        ))),
        area,
    );
}

/// Draw muted help text
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
        area,
    );
}
