// src/ui/mod.rs

use crate::app::App;
use ratatui::prelude::*;

mod layout;
pub mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area(), app.error.is_some());

    widgets::input::render_input(frame, app, layout.input);
    if let Some(message) = &app.error {
        widgets::input::render_error(frame, message, layout.error);
    }
    widgets::analysis_view::render_analysis_view(frame, app, layout.report);
    widgets::history::render_history(frame, app, layout.history);
    widgets::tips::render_tip(frame, layout.tip);
    widgets::tips::render_trust_indicators(frame, layout.indicators);
    widgets::footer::render_footer(frame, app, layout.footer);

    if app.show_disclaimer {
        widgets::disclaimer_popup::render_disclaimer_popup(frame, frame.area());
    }
}
