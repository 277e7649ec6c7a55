// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas of the application, computed once per frame.
pub struct AppLayout {
    pub input: Rect,
    /// Zero-sized when there is no error to show.
    pub error: Rect,
    pub report: Rect,
    pub history: Rect,
    pub tip: Rect,
    pub indicators: Rect,
    pub footer: Rect,
}

/// Splits the frame into a left column (input, error banner, report), a
/// right column (history, tip, trust indicators), and a one-line footer.
pub fn create_layout(frame_size: Rect, show_error: bool) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame_size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_chunks[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(if show_error { 3 } else { 0 }),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(9), Constraint::Length(5)])
        .split(columns[1]);

    AppLayout {
        input: left[0],
        error: left[1],
        report: left[2],
        history: right[0],
        tip: right[1],
        indicators: right[2],
        footer: main_chunks[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_row_only_takes_space_when_shown() {
        let area = Rect::new(0, 0, 100, 40);
        let hidden = create_layout(area, false);
        assert_eq!(hidden.error.height, 0);
        assert_eq!(hidden.report.y, hidden.input.y + hidden.input.height);

        let shown = create_layout(area, true);
        assert_eq!(shown.error.height, 3);
        assert_eq!(shown.footer.height, 1);
        assert_eq!(shown.history.width, 30);
    }

    #[test]
    fn sidebar_panels_sit_under_history() {
        let layout = create_layout(Rect::new(0, 0, 100, 40), false);
        assert_eq!(layout.tip.y, layout.history.y + layout.history.height);
        assert_eq!(layout.indicators.y, layout.tip.y + layout.tip.height);
        assert_eq!(layout.indicators.y + layout.indicators.height, layout.footer.y);
        assert_eq!(layout.tip.height, 9);
        assert_eq!(layout.indicators.height, 5);
    }
}
