//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (main_area, status_area) = layout::create_layout(area);

    forms::draw_intake_form(frame, main_area, app);

    // Draw status bar
    layout::draw_status_bar(frame, status_area, app);

    // Modal banners go on top of everything
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    } else if let Some(notice) = &app.state.notice {
        components::render_notice_dialog(frame, notice);
    }
}
