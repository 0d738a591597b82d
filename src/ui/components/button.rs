//! Boxed button used by the stepper

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Where a step stands relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Render a generic button with border
pub fn render_button(frame: &mut Frame, area: Rect, content: &str, status: StepStatus) {
    let (border_style, text_style) = match status {
        StepStatus::Current => (
            Style::default().fg(Color::Cyan),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        StepStatus::Completed => (
            Style::default().fg(Color::Green),
            Style::default().fg(Color::Green),
        ),
        StepStatus::Pending => (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render one stepper entry: check mark when done, number otherwise
pub fn render_step_button(
    frame: &mut Frame,
    area: Rect,
    number: u8,
    label: &str,
    status: StepStatus,
) {
    let marker = match status {
        StepStatus::Completed => "✓".to_string(),
        _ => number.to_string(),
    };
    let content = format!("{marker} {label}");
    render_button(frame, area, &content, status);
}
