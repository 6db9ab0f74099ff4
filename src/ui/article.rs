//! Article view: the page being shared and its share triggers

use super::components::{render_shortcut_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::share::SharePlatform;
use crate::state::ArticleStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the article view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Artigo ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Article
            Constraint::Length(1),             // Label
            Constraint::Length(BUTTON_HEIGHT), // Share triggers
        ])
        .split(inner);

    draw_page(frame, chunks[0], app);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Compartilhar",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        chunks[1],
    );
    draw_share_row(frame, chunks[2], app);
}

fn draw_page(frame: &mut Frame, area: Rect, app: &App) {
    let page = app.share.page();
    let mut lines = Vec::new();

    match &app.state.article_status {
        ArticleStatus::NotRequested => lines.push(Line::from(Span::styled(
            "Nenhum artigo informado; compartilhando a página inicial.",
            Style::default().fg(Color::DarkGray),
        ))),
        ArticleStatus::Loading => lines.push(Line::from(Span::styled(
            "Carregando artigo...",
            Style::default().fg(Color::Yellow),
        ))),
        ArticleStatus::Failed(error) => lines.push(Line::from(vec![
            Span::styled(
                format!("Não foi possível carregar o artigo: {error}"),
                Style::default().fg(Color::Red),
            ),
            Span::styled("  (r: tentar de novo)", Style::default().fg(Color::DarkGray)),
        ])),
        ArticleStatus::Loaded => {}
    }
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        page.title.as_str(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled(
            page.url.as_str(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ),
        Span::styled("  (y: copiar)", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(page.description.as_str()));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_share_row(frame: &mut Frame, area: Rect, app: &App) {
    let count = SharePlatform::ALL.len() as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(SharePlatform::ALL.map(|_| Constraint::Ratio(1, count)))
        .split(area);

    let selected = app.share.selected_platform();
    for (platform, chunk) in SharePlatform::ALL.into_iter().zip(chunks.iter()) {
        render_shortcut_button(
            frame,
            *chunk,
            platform.shortcut(),
            platform.label(),
            platform == selected,
        );
    }
}
