// src/ui/widgets/history.rs

use crate::app::App;
use crate::core::models::ScanHistoryEntry;
use crate::ui::widgets::gauge::ScoreTone;
use chrono::{Local, TimeZone};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Local calendar date of a history timestamp (Unix ms).
pub fn format_date(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

fn entry_item(entry: &ScanHistoryEntry) -> ListItem<'static> {
    let dot = Span::styled("● ", Style::default().fg(ScoreTone::from_score(entry.score).color()));
    ListItem::new(vec![
        Line::from(vec![dot, Span::styled(entry.title.clone(), Style::default().bold())]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(entry.verdict.to_uppercase(), Style::default().fg(Color::Gray)),
            Span::styled(" • ", Style::default().fg(Color::DarkGray)),
            Span::styled(format_date(entry.timestamp), Style::default().fg(Color::Gray)),
        ]),
    ])
}

/// Renders the "Recent Scans" panel.
pub fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let mut block = Block::default().borders(Borders::ALL).title("Recent Scans");
    if !app.history.is_empty() {
        block = block.title_bottom(Line::from(" Ctrl+L / C: Clear All ").right_aligned());
    }

    if app.history.is_empty() {
        let empty = Paragraph::new(vec![Line::from(""), Line::from("No recent activity".dark_gray())])
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app.history.entries().iter().map(entry_item).collect();
    frame.render_widget(List::new(items).block(block), area);
}
