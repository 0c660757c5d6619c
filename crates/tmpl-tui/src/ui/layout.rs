//! Layout utilities
//!
//! Reusable layout patterns and constraints.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Standard application layout with header, content, and footer
pub fn app_layout(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Footer
        ])
        .areas(area)
}

/// Two-column layout for side-by-side content
pub fn two_column_layout(area: Rect, left_ratio: u32, right_ratio: u32) -> [Rect; 2] {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(left_ratio, left_ratio + right_ratio),
            Constraint::Ratio(right_ratio, left_ratio + right_ratio),
        ])
        .areas(area)
}

/// Rectangle of at most `width` x `height`, centered in `area`
pub fn centered_layout(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Content column: optional token notice, action bar, body
pub fn content_layout(area: Rect, show_notice: bool) -> [Rect; 3] {
    let notice_height = if show_notice { 3 } else { 0 };
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(notice_height),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(area)
}

/// Create form: name input, html editor, submit button
pub fn form_layout(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .areas(area)
}

/// Split a column in two stacked halves when `split` is set
pub fn stacked_layout(area: Rect, split: bool) -> [Rect; 2] {
    let constraints = if split {
        [Constraint::Percentage(40), Constraint::Percentage(60)]
    } else {
        [Constraint::Percentage(100), Constraint::Length(0)]
    };
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .areas(area)
}
