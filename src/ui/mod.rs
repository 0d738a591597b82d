//! UI module for rendering the TUI

mod accommodation;
mod components;
mod field;
mod layout;
mod personal;
mod program;
mod summary;
mod widgets;

use crate::app::App;
use crate::wizard::Step;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Draw the current step
    match app.wizard.current_step() {
        Step::PersonalInfo => personal::draw(frame, main_area, app),
        Step::Program => program::draw(frame, main_area, app),
        Step::Accommodation => accommodation::draw(frame, main_area, app),
        Step::Summary => summary::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog on top of everything
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, app.state.language, message);
    }
}
