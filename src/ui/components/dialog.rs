//! Modal error dialog

use crate::i18n::{t, Language, MessageKey};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;
/// Two columns of padding on each side
const PADDING: u16 = 4;

/// Render the error dialog centered over the current view
pub fn render_error_dialog(frame: &mut Frame, lang: Language, message: &str) {
    let area = frame.area();
    let title = t(lang, MessageKey::ErrorTitle);
    let lines = wrap_text(message, (MAX_WIDTH - PADDING) as usize);

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count()) as u16;
    let width = (content_width + PADDING + 2).min(MAX_WIDTH).min(area.width);
    // title, blank, message, blank, hint, borders
    let height = (lines.len() as u16 + 6).min(area.height);

    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, dialog_area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(lines.into_iter().map(Line::from));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw(format!("{} ", t(lang, MessageKey::Press))),
        Span::styled("Enter", key_style),
        Span::raw(format!(" {} ", t(lang, MessageKey::Or))),
        Span::styled("Esc", key_style),
        Span::raw(format!(" {}", t(lang, MessageKey::ToDismiss))),
    ]));

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(dialog, dialog_area);
}

/// Greedy word wrap; explicit newlines start a new paragraph
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if !current.is_empty() && needed > max_width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_text_breaks_on_words() {
        let lines = wrap_text("cannot jump from step 1 to step 3", 12);
        assert_eq!(lines, vec!["cannot jump", "from step 1", "to step 3"]);
    }

    #[test]
    fn test_wrap_text_keeps_paragraphs() {
        let lines = wrap_text("first\n\nsecond", 40);
        assert_eq!(lines, vec!["first", "", "second"]);
    }
}
