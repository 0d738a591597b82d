//! Single-line input field rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Input row: label as title, value with cursor, error as bottom title
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub is_active: bool,
    pub error: Option<&'a str>,
    /// Shown under the field while it is active and valid
    pub hint: Option<&'a str>,
}

/// Draw a form field; errors turn the border red
pub fn draw_field(frame: &mut Frame, area: Rect, field: FieldView<'_>) {
    let border_style = match (field.error, field.is_active) {
        (Some(_), _) => Style::default().fg(Color::Red),
        (None, true) => Style::default().fg(Color::Cyan),
        (None, false) => Style::default().fg(Color::DarkGray),
    };
    let value_style = if field.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display_value = if field.value.is_empty() && !field.is_active {
        "(empty)"
    } else {
        field.value
    };
    let cursor = if field.is_active { "▌" } else { "" };

    let mut block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = field.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(hint) = field.hint.filter(|_| field.is_active) {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {hint} "),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));
    frame.render_widget(content.block(block), area);
}
