//! Intake form rendering

use super::field_renderer::{draw_field, field_height};
use crate::app::App;
use crate::state::{Form, FormAction};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use crate::validation::FieldId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the intake form with action sidebar
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app);
}

/// Draw the form fields
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;

    let mut constraints: Vec<Constraint> = FieldId::ALL
        .iter()
        .map(|id| Constraint::Length(field_height(form.field(*id))))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    // Form is focused when not on the action panel
    let form_focused = !form.is_actions_row_active();
    let border_color = if app.is_submitting() {
        Color::Yellow
    } else if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" New Project Inquiry ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    for (idx, id) in FieldId::ALL.iter().enumerate() {
        let is_active = !app.is_submitting() && form.active_field() == idx;
        draw_field(
            frame,
            chunks[idx],
            form.field(*id),
            is_active,
            app.state.field_errors.get(*id),
        );
    }
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let is_focused = form.is_actions_row_active();
    let submitting = app.is_submitting();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit (primary)
            Constraint::Length(BUTTON_HEIGHT), // Reset
            Constraint::Length(BUTTON_HEIGHT), // Quit
            Constraint::Min(0),                // Help text
        ])
        .split(inner_area);

    for (idx, action) in FormAction::ALL.iter().enumerate() {
        let (label, color) = match action {
            FormAction::Submit if submitting => ("Submitting…", Color::Yellow),
            FormAction::Submit => (action.label(), Color::Green),
            FormAction::Reset => (action.label(), Color::Gray),
            FormAction::Quit => (action.label(), Color::Red),
        };
        render_action_button(
            frame,
            button_chunks[idx],
            label,
            is_focused && form.selected_action() == *action,
            !submitting,
            Some(color),
        );
    }

    let help = Paragraph::new(vec![
        Line::from(Span::styled(
            "Fields marked",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "optional may be",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "left blank.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(help, button_chunks[3]);
}
