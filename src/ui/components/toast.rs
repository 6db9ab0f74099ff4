//! Toast rendering: inline alerts above the form and the floating share notice

use crate::state::{Severity, Toast, ToastPhase};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

/// Maximum width of the floating notice
const NOTICE_MAX_WIDTH: u16 = 44;

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Info => Color::Cyan,
    }
}

/// Height an inline alert needs at `width`
pub fn alert_height(toast: &Toast, width: u16) -> u16 {
    let text_width = width.saturating_sub(6).max(1) as usize;
    wrap_text(&toast.message, text_width).len() as u16 + 2
}

/// Render a toast as an alert box in the page flow
pub fn render_alert(frame: &mut Frame, area: Rect, toast: &Toast) {
    let color = severity_color(toast.severity);
    let text_width = area.width.saturating_sub(6).max(1) as usize;

    let mut lines: Vec<Line> = wrap_text(&toast.message, text_width)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let lead = if i == 0 {
                format!("{} ", toast.severity.icon())
            } else {
                "  ".to_string()
            };
            Line::from(vec![
                Span::styled(lead, Style::default().fg(color)),
                Span::raw(text),
            ])
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    if toast.is_sticky() {
        block = block.title_bottom(Line::from(" Esc: fechar ").right_aligned());
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Where the floating notice sits at a given phase: top-right of `frame_area`,
/// shifted right while it slides out
pub fn notice_area(frame_area: Rect, message: &str, phase: ToastPhase) -> Option<Rect> {
    let progress = match phase {
        ToastPhase::Visible => 0.0,
        ToastPhase::Leaving(progress) => progress.clamp(0.0, 1.0),
        ToastPhase::Expired => return None,
    };

    let width = (message.chars().count() as u16 + 6)
        .min(NOTICE_MAX_WIDTH)
        .min(frame_area.width);
    let lines = wrap_text(message, width.saturating_sub(6).max(1) as usize).len() as u16;
    let height = (lines + 2).min(frame_area.height);

    let right_margin = 1;
    let resting_x = frame_area.right().saturating_sub(width + right_margin);
    let slide = ((width + right_margin) as f32 * progress) as u16;
    let x = resting_x + slide;
    let visible_width = frame_area.right().saturating_sub(x).min(width);
    if visible_width == 0 {
        return None;
    }

    Some(Rect {
        x,
        y: frame_area.y + 1,
        width: visible_width,
        height,
    })
}

/// Render a floating notice in the top-right corner
pub fn render_notice(frame: &mut Frame, toast: &Toast, now: Instant) {
    let Some(area) = notice_area(frame.area(), &toast.message, toast.phase(now)) else {
        return;
    };
    let color = severity_color(toast.severity);
    let text_width = area.width.saturating_sub(6).max(1) as usize;
    let lines: Vec<Line> = wrap_text(&toast.message, text_width)
        .into_iter()
        .map(|text| Line::from(format!(" {} {text}", toast.severity.icon())))
        .collect();

    frame.render_widget(Clear, area);
    let notice = Paragraph::new(lines)
        .style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(notice, area);
}

/// Wrap text to fit within a maximum width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_width = current_line.chars().count();
            if current_width + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
