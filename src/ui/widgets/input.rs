// src/ui/widgets/input.rs
use crate::app::{App, AppState, MIN_INPUT_CHARS};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders the article input box with its character counter.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.input.chars().count();
    let counter_style = if app.input.trim().chars().count() >= MIN_INPUT_CHARS {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = match app.state {
        AppState::Idle => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::DarkGray),
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Analyze News Content")
        .title_bottom(Line::from(Span::styled(format!(" {} characters ", count), counter_style)).right_aligned());

    let inner = input_block.inner(area);
    let rows = wrap_rows(&app.input, usize::from(inner.width));

    // Scroll so the last wrapped row, where the cursor sits, stays in view.
    let visible = usize::from(inner.height.max(1));
    let scroll = rows.len().saturating_sub(visible);

    let input_paragraph = if app.input.is_empty() {
        Paragraph::new("Paste article text here... (e.g., 'A new study claims that drinking 10 cups of coffee daily...')")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
    } else {
        let lines: Vec<Line> = rows.iter().map(|row| Line::from(row.as_str())).collect();
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .scroll((scroll as u16, 0))
    };
    frame.render_widget(input_paragraph.block(input_block), area);

    if app.state == AppState::Idle && !app.show_disclaimer && inner.width > 0 && inner.height > 0 {
        let last = rows.last().map(|row| row.chars().count()).unwrap_or(0);
        let row = rows.len().saturating_sub(1 + scroll);
        frame.set_cursor_position((inner.x + last as u16, inner.y + row as u16));
    }
}

/// Splits the input into display rows of at most `width` characters.
///
/// Every `\n` starts a new row. A row that fills the width exactly is
/// followed by an empty row so the cursor has somewhere to go.
pub fn wrap_rows(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        rows.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
    }
    if rows.last().is_some_and(|row| row.chars().count() == width) {
        rows.push(String::new());
    }
    rows
}

/// Renders the inline error banner.
pub fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled("! ", Style::default().fg(Color::Red).bold()),
        Span::styled(message.to_string(), Style::default().fg(Color::Red)),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
    frame.render_widget(banner, area);
}
