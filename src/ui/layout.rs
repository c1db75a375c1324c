//! Layout components (main area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::submit::SubmissionState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the main content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar: submission state, last message, key hints
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.submission_state();
    let state_color = match state {
        SubmissionState::Idle => Color::DarkGray,
        SubmissionState::Submitting => Color::Yellow,
        SubmissionState::Succeeded(_) => Color::Green,
        SubmissionState::Failed(_) => Color::Red,
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.label()),
            Style::default()
                .fg(Color::Black)
                .bg(state_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    if let Some(message) = &app.state.status_message {
        spans.push(Span::styled(message.as_str(), Style::default().fg(Color::White)));
        spans.push(Span::raw("  "));
    }

    let hints = if app.is_submitting() {
        "Waiting for the server…".to_string()
    } else {
        format!("Tab: next field | Space: toggle | {SUBMIT_SHORTCUT}: submit | Esc: quit")
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
