use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};
use sift_core::config::RenderPolicy;
use sift_core::render::SEPARATOR;
use textwrap::wrap;

use crate::app::App;

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let width = area.width as usize;

    // Query field grows with long queries
    let input_text = format!("❯ {}", app.query);
    let wrapped_lines = wrap(&input_text, width.saturating_sub(2).max(1));
    let input_height = wrapped_lines.len().max(1) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Length(input_height), // Query field
            Constraint::Length(1),            // Separator
            Constraint::Min(1),               // Results pane
            Constraint::Length(1),            // Footer
        ])
        .split(area);

    // --- HEADER ---
    let policy = match app.render_policy() {
        RenderPolicy::LastResolved => "last resolved",
        RenderPolicy::LatestRequest => "latest request",
    };
    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Sift ")
        .border_style(Style::default().fg(Color::DarkGray));
    let header = Paragraph::new(Line::from(vec![
        Span::styled("POST ", Style::default().yellow().bold()),
        Span::raw(app.endpoint.clone()),
        Span::styled(format!("  ({})", policy), Style::default().dark_gray()),
    ]))
    .block(header_block);
    f.render_widget(header, chunks[0]);

    // --- QUERY FIELD ---
    let input = Paragraph::new(
        wrapped_lines
            .iter()
            .map(|s| Line::from(s.to_string()))
            .collect::<Vec<_>>(),
    )
    .bold();
    f.render_widget(input, chunks[1]);

    f.render_widget(Paragraph::new("─".repeat(width)).dim(), chunks[2]);

    // --- RESULTS ---
    let results_chunk = chunks[3];
    let height = results_chunk.height as usize;
    let total = app.results.len();

    if total > 0 {
        app.scroll_offset = app.scroll_offset.min(total - 1);
    } else {
        app.scroll_offset = 0;
    }

    let items: Vec<ListItem> = app
        .results
        .rows()
        .iter()
        .skip(app.scroll_offset)
        .take(height)
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::styled(row.path.clone(), Style::default().white()),
                Span::styled(SEPARATOR, Style::default().dark_gray()),
                Span::styled(row.rank.clone(), Style::default().cyan()),
            ]))
        })
        .collect();
    f.render_widget(List::new(items), results_chunk);

    // --- FOOTER ---
    let mut status = format!("{} results", total);
    if app.in_flight > 0 {
        status.push_str(&format!("  •  {} in flight", app.in_flight));
    }
    let footer = match &app.last_error {
        Some(e) => Line::from(vec![
            Span::styled(format!("Error: {}", e), Style::default().red()),
            Span::raw("  •  "),
            Span::raw(status),
        ]),
        None => Line::from(format!("{}  •  Enter: Search  •  ↑↓ PgUp PgDn: Scroll  •  ESC: Quit", status)).gray(),
    };
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Right), chunks[4]);
}
