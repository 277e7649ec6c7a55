// src/ui/widgets/mod.rs

// Widget modules for each area of the screen.

pub mod analysis_view;    // The credibility report for the current result.
pub mod disclaimer_popup; // The launch disclaimer popup.
pub mod footer;           // The dynamic key-hint bar.
pub mod gauge;            // The circular credibility gauge.
pub mod history;          // The "Recent Scans" panel.
pub mod input;            // The article input box and error banner.
pub mod tips;             // The static "Did you know?" and trust indicator panels.
