// src/ui/widgets/disclaimer_popup.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    text::Line,
};

/// Renders the launch disclaimer on top of the existing UI.
///
/// `Clear` wipes the popup area first so the interface underneath does not
/// bleed through.
pub fn render_disclaimer_popup(frame: &mut Frame, area: Rect) {
    let disclaimer_text = Text::from(vec![
        Line::from("VERITAS RS".bold().yellow()),
        Line::from(""),
        Line::from("Paste a news article, text snippet or claim to receive a credibility assessment: score, verdict, bias level, factual issues, clickbait risk and verification of key claims."),
        Line::from(""),
        Line::from("Analysis is performed by Google Gemini with Search grounding. Your text is sent to that service."),
        Line::from(""),
        Line::from("Results are for informational purposes only and should not be used as the sole basis for critical decisions. Always verify multiple sources before sharing."),
        Line::from(""),
        Line::from("Press ".bold() + "Enter".bold().yellow() + " to continue".bold()),
    ]);

    let block = Block::default()
        .title("About")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let popup_area = centered_rect(60, 60, area);

    let popup = Paragraph::new(disclaimer_text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// Returns a `Rect` of the given percentage size centred within `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);

    center
}
