// src/ui/widgets/tips.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const TIP_FACT: &str =
    "Fake news spreads 6x faster than true news on social media. Always verify multiple sources before sharing.";
pub const TIP_HINT: &str = "Check for provocative language and missing author details.";

/// Signals worth checking in any article, with their marker colour.
pub const TRUST_INDICATORS: [(&str, Color); 3] = [
    ("Neutral Language", Color::Blue),
    ("Source Citation", Color::Green),
    ("No Emotional Triggers", Color::Magenta),
];

fn tip_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(TIP_FACT),
        Line::from(""),
        Line::from(vec![
            Span::styled("💡 ", Style::default().fg(Color::Yellow)),
            Span::styled(TIP_HINT, Style::default().italic()),
        ]),
    ]
}

fn indicator_lines() -> Vec<Line<'static>> {
    TRUST_INDICATORS
        .iter()
        .map(|(label, color)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(*color)),
                Span::styled(*label, Style::default().fg(Color::Gray)),
            ])
        })
        .collect()
}

pub fn render_tip(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Indexed(99)))
        .title("Did you know?");
    let tip = Paragraph::new(tip_lines()).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(tip, area);
}

pub fn render_trust_indicators(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Trust Indicators");
    frame.render_widget(Paragraph::new(indicator_lines()).block(block), area);
}
