// src/ui/widgets/gauge.rs

use ratatui::{
    prelude::*,
    widgets::{
        canvas::{Canvas, Points},
        Block, Paragraph,
    },
};
use std::f64::consts::PI;

/// Colour band a 0-100 score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    Good,
    Warning,
    Bad,
}

impl ScoreTone {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTone::Good
        } else if score >= 50.0 {
            ScoreTone::Warning
        } else {
            ScoreTone::Bad
        }
    }

    pub fn color(self) -> Color {
        match self {
            ScoreTone::Good => Color::Green,
            ScoreTone::Warning => Color::Yellow,
            ScoreTone::Bad => Color::Red,
        }
    }
}

/// Geometry of a circular score gauge, the way an SVG stroke-dash arc is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeArc {
    pub score: f64,
    pub size: f64,
    pub radius: f64,
    pub circumference: f64,
    /// Length of the unfilled part of the stroke.
    pub dash_offset: f64,
    /// Filled share of the circle, in `[0, 1]`.
    pub fill_ratio: f64,
    pub tone: ScoreTone,
}

impl GaugeArc {
    pub fn new(score: f64, size: f64) -> Self {
        let radius = size / 2.5;
        let circumference = 2.0 * PI * radius;
        let fill_ratio = (score / 100.0).clamp(0.0, 1.0);
        Self {
            score,
            size,
            radius,
            circumference,
            dash_offset: circumference - fill_ratio * circumference,
            fill_ratio,
            tone: ScoreTone::from_score(score),
        }
    }

    pub fn label(&self) -> String {
        format!("{}%", self.score.round() as i64)
    }

    /// Points along the filled arc, from 12 o'clock clockwise, centred on the origin.
    ///
    /// `steps` is the resolution of the full circle.
    pub fn arc_points(&self, steps: usize) -> Vec<(f64, f64)> {
        let filled = (steps as f64 * self.fill_ratio).round() as usize;
        (0..filled).map(|i| self.point_at(i, steps)).collect()
    }

    /// Points of the whole circle, used for the background track.
    pub fn track_points(&self, steps: usize) -> Vec<(f64, f64)> {
        (0..steps).map(|i| self.point_at(i, steps)).collect()
    }

    fn point_at(&self, i: usize, steps: usize) -> (f64, f64) {
        let angle = PI / 2.0 - 2.0 * PI * (i as f64 / steps as f64);
        (self.radius * angle.cos(), self.radius * angle.sin())
    }
}

const ARC_STEPS: usize = 180;

/// Renders a circular gauge for `score` with a caption below it.
pub fn render_gauge(frame: &mut Frame, score: f64, caption: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    // Terminal cells are roughly twice as tall as wide: one x unit per column,
    // two y units per row keeps the circle round.
    let size = f64::from(chunks[0].height.max(1)) * 2.0;
    let arc = GaugeArc::new(score, size);
    let half = size / 2.0;
    let x_half = f64::from(chunks[0].width.max(1)) / 2.0;
    let track = arc.track_points(ARC_STEPS);
    let filled = arc.arc_points(ARC_STEPS);
    let label = arc.label();

    let canvas = Canvas::default()
        .block(Block::default())
        .marker(symbols::Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-half, half])
        .paint(move |ctx| {
            ctx.draw(&Points { coords: &track, color: Color::DarkGray });
            ctx.layer();
            ctx.draw(&Points { coords: &filled, color: arc.tone.color() });
            ctx.layer();
            ctx.print(
                -(label.len() as f64) / 2.0,
                0.0,
                Span::styled(label.clone(), Style::default().bold()),
            );
        });
    frame.render_widget(canvas, chunks[0]);

    let caption = Paragraph::new(caption.to_uppercase())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(caption, chunks[1]);
}
