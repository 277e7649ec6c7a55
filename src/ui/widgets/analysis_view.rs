// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use crate::core::models::{AnalysisResult, BiasLevel, Source, Verdict};
use crate::ui::widgets::gauge;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
};

// --- Presentation Model ---

/// Badge colour for a verdict label. Unknown labels get a neutral gray.
pub fn verdict_color(verdict: &str) -> Color {
    match verdict.trim().parse::<Verdict>() {
        Ok(Verdict::Reliable) => Color::Green,
        Ok(Verdict::PartiallyReliable) => Color::Yellow,
        Ok(Verdict::Unreliable) => Color::LightRed,
        Ok(Verdict::LikelyFake) => Color::Red,
        Err(_) => Color::Gray,
    }
}

pub fn bias_color(level: Option<BiasLevel>) -> Color {
    match level {
        Some(BiasLevel::Low) => Color::Green,
        Some(BiasLevel::Medium) => Color::Yellow,
        _ => Color::Red,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: &'static str,
    pub headline: String,
    pub color: Color,
    /// Bar fill in percent, for cards that show one.
    pub bar: Option<u16>,
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClaimLine {
    pub verified: bool,
    pub claim: String,
    pub explanation: String,
}

impl ClaimLine {
    pub fn icon(&self) -> &'static str {
        if self.verified { "✓" } else { "✗" }
    }

    pub fn color(&self) -> Color {
        if self.verified { Color::Green } else { Color::Red }
    }
}

/// Everything the report panel shows for one result, independent of layout.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPresentation {
    pub score: f64,
    pub verdict: String,
    pub verdict_color: Color,
    pub summary: String,
    pub cards: [Card; 3],
    pub claims: Vec<ClaimLine>,
    /// `None` when the model cited nothing; the section is then left out.
    pub sources: Option<Vec<Source>>,
}

fn percent(score: f64) -> u16 {
    score.clamp(0.0, 100.0).round() as u16
}

impl AnalysisPresentation {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let bias = &result.bias_analysis;
        let accuracy = &result.factual_accuracy;
        let clickbait = &result.clickbait_potential;

        let accuracy_headline = if accuracy.issues.is_empty() {
            "No major factual errors found.".to_string()
        } else {
            format!("{} potential inaccuracies detected.", accuracy.issues.len())
        };

        let cards = [
            Card {
                title: "Bias Analysis",
                headline: format!("{} Bias", bias.level),
                color: bias_color(bias.level_kind()),
                bar: None,
                body: vec![bias.description.clone()],
            },
            Card {
                title: "Accuracy",
                headline: accuracy_headline,
                color: Color::Green,
                bar: Some(percent(accuracy.score)),
                body: accuracy.issues.iter().map(|i| format!("- {}", i)).collect(),
            },
            Card {
                title: "Clickbait Risk",
                headline: format!("{}%", percent(clickbait.score)),
                color: Color::LightRed,
                bar: Some(percent(clickbait.score)),
                body: vec![clickbait.description.clone()],
            },
        ];

        let claims = result
            .key_claims
            .iter()
            .map(|c| ClaimLine {
                verified: c.is_verified,
                claim: c.claim.clone(),
                explanation: c.explanation.clone(),
            })
            .collect();

        let sources = if result.sources_found.is_empty() {
            None
        } else {
            Some(result.sources_found.clone())
        };

        Self {
            score: result.credibility_score,
            verdict: result.verdict.clone(),
            verdict_color: verdict_color(&result.verdict),
            summary: result.summary.clone(),
            cards,
            claims,
            sources,
        }
    }
}

// --- Rendering ---

fn bar_line(percent: u16, width: usize, color: Color) -> Line<'static> {
    let filled = (width * usize::from(percent.min(100))) / 100;
    Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(width - filled), Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}%", percent)),
    ])
}

fn section_title(icon: &str, title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{} {}", icon, title),
        Style::default().fg(Color::Cyan).bold(),
    ))
}

/// Builds the scrollable body of the report: summary, cards, claims and sources.
pub fn report_lines(p: &AnalysisPresentation, bar_width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        section_title("≡", "Analysis Summary"),
        Line::from(p.summary.clone()),
        Line::from(""),
    ];

    for card in &p.cards {
        lines.push(Line::from(card.title.bold()));
        lines.push(Line::from(Span::styled(card.headline.clone(), Style::default().fg(card.color))));
        if let Some(fill) = card.bar {
            lines.push(bar_line(fill, bar_width, card.color));
        }
        for body in &card.body {
            lines.push(Line::from(body.clone()));
        }
        lines.push(Line::from(""));
    }

    lines.push(section_title("◆", "Key Claims Verification"));
    if p.claims.is_empty() {
        lines.push(Line::from("No key claims were identified.".italic()));
    }
    for claim in &p.claims {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", claim.icon()), Style::default().fg(claim.color())),
            Span::styled(claim.claim.clone(), Style::default().bold()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", claim.explanation),
            Style::default().fg(Color::Gray),
        )));
    }

    if let Some(sources) = &p.sources {
        lines.push(Line::from(""));
        lines.push(section_title("🔗", "Grounding Sources"));
        for source in sources {
            lines.push(Line::from(vec![
                Span::raw("- "),
                Span::styled(source.title.clone(), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  {}", source.url),
                Style::default().fg(Color::DarkGray).underlined(),
            )));
        }
    }

    lines
}

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis Report (Navigate with ↑ ↓)");

    let Some(result) = app.result.as_ref().filter(|_| matches!(app.state, AppState::Finished)) else {
        let content = match app.state {
            AppState::Analyzing => Paragraph::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", SPINNER_CHARS[app.spinner_frame]), Style::default().fg(Color::Cyan)),
                    Span::raw("Checking claims and sources..."),
                ]),
                Line::from(""),
                Line::from("Gemini is searching the web to verify facts and analyze bias patterns.".dark_gray()),
            ]),
            _ => Paragraph::new("Paste an article, text snippet, or claim and press Enter to evaluate its credibility."),
        };
        frame.render_widget(content.alignment(Alignment::Center).wrap(Wrap { trim: true }).block(main_block), area);
        return;
    };

    let presentation = AnalysisPresentation::from_result(result);
    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(inner_area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)])
        .split(chunks[0]);

    gauge::render_gauge(frame, presentation.score, "Credibility", header[0]);

    let headline = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} ", presentation.verdict),
            Style::default().fg(Color::Black).bg(presentation.verdict_color).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Credibility score "),
            Span::styled(format!("{}/100", percent(presentation.score)), Style::default().bold()),
        ]),
        Line::from(Span::styled(
            format!("{} grounding source(s)", presentation.sources.as_ref().map_or(0, Vec::len)),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(headline, header[1]);

    let bar_width = usize::from(chunks[1].width.saturating_sub(8).clamp(10, 40));
    let body = Paragraph::new(report_lines(&presentation, bar_width))
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: false });

    // Leave the rightmost column to the scrollbar.
    let body_area = Rect { width: chunks[1].width.saturating_sub(1), ..chunks[1] };

    // Both counts include the top border row.
    let total_rows = body.line_count(body_area.width);
    let max_scroll = total_rows.saturating_sub(usize::from(body_area.height));
    app.report_max_scroll = max_scroll;
    app.scroll_offset = app.scroll_offset.min(max_scroll);

    let body = body.scroll((app.scroll_offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(body, body_area);

    app.report_scroll_state = app
        .report_scroll_state
        .content_length(max_scroll + 1)
        .position(app.scroll_offset);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        chunks[1],
        &mut app.report_scroll_state,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::{HistoryStore, HISTORY_FILE};
    use crate::core::models::fixtures::sample_result;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn finished_app(dir: &TempDir, result: AnalysisResult) -> App {
        let mut app = App::new(HistoryStore::open(dir.path().join(HISTORY_FILE)));
        app.dismiss_disclaimer();
        app.state = AppState::Finished;
        app.result = Some(result);
        app
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn verdict_colors_match_labels() {
        assert_eq!(verdict_color("Reliable"), Color::Green);
        assert_eq!(verdict_color("Partially Reliable"), Color::Yellow);
        assert_eq!(verdict_color("Unreliable"), Color::LightRed);
        assert_eq!(verdict_color("Likely Fake"), Color::Red);
    }

    #[test]
    fn unknown_verdict_falls_back_to_neutral() {
        assert_eq!(verdict_color("Needs Context"), Color::Gray);
        assert_eq!(verdict_color(""), Color::Gray);
    }

    #[test]
    fn bias_level_colors() {
        assert_eq!(bias_color(Some(BiasLevel::Low)), Color::Green);
        assert_eq!(bias_color(Some(BiasLevel::Medium)), Color::Yellow);
        assert_eq!(bias_color(Some(BiasLevel::High)), Color::Red);
        assert_eq!(bias_color(None), Color::Red);
    }

    #[test]
    fn accuracy_card_counts_issues() {
        let mut result = sample_result(60.0, "Partially Reliable");
        let p = AnalysisPresentation::from_result(&result);
        assert_eq!(p.cards[1].headline, "1 potential inaccuracies detected.");
        assert_eq!(p.cards[1].bar, Some(65));

        result.factual_accuracy.issues.clear();
        let p = AnalysisPresentation::from_result(&result);
        assert_eq!(p.cards[1].headline, "No major factual errors found.");
    }

    #[test]
    fn bias_card_names_level() {
        let p = AnalysisPresentation::from_result(&sample_result(60.0, "Reliable"));
        assert_eq!(p.cards[0].headline, "Medium Bias");
        assert_eq!(p.cards[0].color, Color::Yellow);
        assert_eq!(p.cards[2].bar, Some(40));
    }

    #[test]
    fn claims_carry_verification_indicator() {
        let p = AnalysisPresentation::from_result(&sample_result(60.0, "Reliable"));
        assert_eq!(p.claims.len(), 2);
        assert_eq!(p.claims[0].icon(), "✓");
        assert_eq!(p.claims[0].color(), Color::Green);
        assert_eq!(p.claims[1].icon(), "✗");
        assert_eq!(p.claims[1].color(), Color::Red);
    }

    #[test]
    fn sources_section_omitted_when_empty() {
        let result = sample_result(60.0, "Reliable");
        let p = AnalysisPresentation::from_result(&result);
        assert!(p.sources.is_none());

        let text: String = report_lines(&p, 20)
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(!text.contains("Grounding Sources"));
    }

    #[test]
    fn sources_section_lists_links() {
        let mut result = sample_result(60.0, "Reliable");
        result.sources_found = vec![Source {
            title: "Labour statistics".to_string(),
            url: "https://stats.example/labour".to_string(),
        }];
        let p = AnalysisPresentation::from_result(&result);

        let text: String = report_lines(&p, 20)
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("Grounding Sources"));
        assert!(text.contains("Labour statistics"));
        assert!(text.contains("https://stats.example/labour"));
    }

    #[test]
    fn bar_fill_is_proportional() {
        let line = bar_line(50, 10, Color::Green);
        assert_eq!(line.spans[0].content, "█".repeat(5));
        assert_eq!(line.spans[1].content, "░".repeat(5));
    }

    #[test]
    fn summary_opens_the_scrollable_body() {
        let p = AnalysisPresentation::from_result(&sample_result(60.0, "Reliable"));
        let lines = report_lines(&p, 20);
        assert_eq!(lines[0].to_string(), "≡ Analysis Summary");
        assert_eq!(lines[1].to_string(), p.summary);
    }

    #[test]
    fn long_summary_is_not_cut_off() {
        let dir = TempDir::new().unwrap();
        let mut result = sample_result(60.0, "Reliable");
        result.summary = format!("{}SUMMARYEND", "The claim rests on one anonymous quote. ".repeat(10));
        let mut app = finished_app(&dir, result);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render_analysis_view(f, &mut app, f.area())).unwrap();
        assert!(screen(&terminal).contains("SUMMARYEND"));
    }

    #[test]
    fn scrolling_stops_at_the_end_of_the_report() {
        let dir = TempDir::new().unwrap();
        let mut result = sample_result(60.0, "Reliable");
        result.sources_found = vec![Source {
            title: "Labour statistics".to_string(),
            url: "https://stats.example/labour".to_string(),
        }];
        let mut app = finished_app(&dir, result);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render_analysis_view(f, &mut app, f.area())).unwrap();
        let max = app.report_max_scroll;
        assert!(max > 0);

        for _ in 0..(max + 50) {
            app.scroll_down();
        }
        assert_eq!(app.scroll_offset, max);

        terminal.draw(|f| render_analysis_view(f, &mut app, f.area())).unwrap();
        assert_eq!(app.scroll_offset, max);
        assert!(screen(&terminal).contains("https://stats.example/labour"));
    }
}
