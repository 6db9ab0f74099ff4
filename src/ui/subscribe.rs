//! Subscribe view: subscriber counter, feedback, the form and its submit button

use super::components::{alert_height, render_alert, render_busy_button, BUTTON_HEIGHT};
use super::forms::{draw_checkbox, draw_field, draw_field_note, draw_help_text};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::Focus;
use crate::subscription::{format_count, SubscriptionController};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Rows outside the form viewport: header, status bar and the view border
const CHROME_HEIGHT: u16 = 4;
const FIELD_HEIGHT: u16 = 3;
const SUBMIT_WIDTH: u16 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Counter,
    Feedback,
    Field(Focus),
    Note(Focus),
    Suggestion,
    CategoriesHeader,
    Category(usize),
    Submit,
    Help,
}

/// Vertical layout of the form content at `width`, top to bottom
fn rows(controller: &SubscriptionController, width: u16) -> Vec<(Row, u16)> {
    let mut rows = Vec::new();
    if controller.counter().is_some() {
        rows.push((Row::Counter, 2));
    }
    if let Some(toast) = controller.toast() {
        rows.push((Row::Feedback, alert_height(toast, width)));
    } else if let Some(errors) = controller.validation_errors() {
        rows.push((Row::Feedback, errors.len() as u16 + 2));
    }

    rows.push((Row::Field(Focus::Name), FIELD_HEIGHT));
    rows.push((Row::Note(Focus::Name), 1));
    rows.push((Row::Field(Focus::Email), FIELD_HEIGHT));
    rows.push((Row::Note(Focus::Email), 1));
    if controller.suggestion().is_some() {
        rows.push((Row::Suggestion, 1));
    }

    let categories = controller.form().categories.len();
    if categories > 0 {
        rows.push((Row::CategoriesHeader, 1));
        rows.extend((0..categories).map(|i| (Row::Category(i), 1)));
    }

    rows.push((Row::Submit, BUTTON_HEIGHT));
    rows.push((Row::Help, 1));
    rows
}

/// Content offsets `(top, bottom)` of the focused control
fn focus_span(rows: &[(Row, u16)], focus: Focus) -> Option<(u16, u16)> {
    let target = match focus {
        Focus::Submit => Row::Submit,
        Focus::Category(index) => Row::Category(index),
        field => Row::Field(field),
    };
    let mut top = 0;
    for &(row, height) in rows {
        if row == target {
            return Some((top, top + height));
        }
        top += height;
    }
    None
}

/// Scroll offset that keeps the focused control inside the viewport
pub fn scroll_for_focus(
    controller: &SubscriptionController,
    current: u16,
    terminal_size: Option<(u16, u16)>,
) -> u16 {
    let Some((height, width)) = terminal_size else {
        return current;
    };
    let viewport = height.saturating_sub(CHROME_HEIGHT);
    if viewport == 0 {
        return current;
    }

    let rows = rows(controller, width.saturating_sub(2));
    let Some((top, bottom)) = focus_span(&rows, controller.form().focus) else {
        return current;
    };
    if top < current {
        top
    } else if bottom > current + viewport {
        bottom - viewport
    } else {
        current
    }
}

fn spinner_clock() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Draw the subscribe view
pub fn draw(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let block = Block::default()
        .title(" Assine a newsletter TechNews ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let controller = &app.subscription;
    let scroll = app.state.form_scroll;
    let mut top = 0u16;
    for (row, height) in rows(controller, inner.width) {
        let row_top = top;
        top += height;
        if let Some(rect) = row_area(row, row_top, height, scroll, inner) {
            draw_row(frame, rect, row, controller, now);
        }
    }
}

/// Screen area of a row starting at content offset `row_top`.
/// Rows are drawn whole; feedback taller than the room left is clipped instead.
fn row_area(row: Row, row_top: u16, height: u16, scroll: u16, viewport: Rect) -> Option<Rect> {
    let bottom = scroll.saturating_add(viewport.height);
    if row_top < scroll || row_top >= bottom {
        return None;
    }
    let room = bottom - row_top;
    let height = match row {
        _ if height <= room => height,
        Row::Feedback => room,
        _ => return None,
    };
    Some(Rect {
        x: viewport.x,
        y: viewport.y + row_top - scroll,
        width: viewport.width,
        height,
    })
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    row: Row,
    controller: &SubscriptionController,
    now: Instant,
) {
    let form = controller.form();
    match row {
        Row::Counter => {
            if let Some(counter) = controller.counter() {
                let line = Line::from(vec![
                    Span::styled(
                        format_count(counter.displayed(now)),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" inscritos"),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
        }
        Row::Feedback => {
            if let Some(toast) = controller.toast() {
                render_alert(frame, area, toast);
            } else if let Some(errors) = controller.validation_errors() {
                draw_validation_errors(frame, area, errors);
            }
        }
        Row::Field(focus) => {
            if let Some(field) = form.field(focus) {
                draw_field(frame, area, field, form.focus == focus);
            }
        }
        Row::Note(focus) => {
            if let Some(field) = form.field(focus) {
                draw_field_note(frame, area, field);
            }
        }
        Row::Suggestion => {
            if let Some(suggestion) = controller.suggestion() {
                let line = Line::from(vec![
                    Span::styled(" Você quis dizer: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        suggestion.suggested_email.as_str(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("? (→ aceita)", Style::default().fg(Color::DarkGray)),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
        }
        Row::CategoriesHeader => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Categorias de interesse",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                area,
            );
        }
        Row::Category(index) => {
            if let Some(option) = form.categories.get(index) {
                draw_checkbox(frame, area, option, form.focus == Focus::Category(index));
            }
        }
        Row::Submit => {
            let button = Rect {
                width: SUBMIT_WIDTH.min(area.width),
                ..area
            };
            render_busy_button(
                frame,
                button,
                "Inscrever-se",
                "Enviando...",
                form.focus == Focus::Submit,
                controller.is_loading().then(spinner_clock),
            );
        }
        Row::Help => {
            draw_help_text(
                frame,
                area,
                &format!("Tab: próximo  Espaço: marcar  {SUBMIT_SHORTCUT}: enviar  Esc: fechar aviso"),
            );
        }
    }
}

fn draw_validation_errors(frame: &mut Frame, area: Rect, errors: &[String]) {
    let lines: Vec<Line> = errors
        .iter()
        .map(|error| Line::from(format!("• {error}")))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(" ✖ ", Style::default().fg(Color::Red)))
        .title_bottom(Line::from(" Esc: fechar ").right_aligned());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
