// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let spans = match app.state {
        AppState::Idle => Line::from(vec![
            key("Enter"),
            Span::raw(" analyze, "),
            key("Ctrl+L"),
            Span::raw(" clear history, "),
            key("Esc"),
            Span::raw(" quit."),
        ]),
        AppState::Finished => Line::from(vec![
            key("[N]"),
            Span::raw("ew analysis, "),
            key("[E]"),
            Span::raw("dit text, "),
            key("[C]"),
            Span::raw("lear history, "),
            key("[Q]"),
            Span::raw("uit"),
        ]),
        AppState::Analyzing => Line::from("Analyzing with Gemini... Press Esc to quit."),
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
