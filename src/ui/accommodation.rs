//! Accommodation step view

use super::widgets::{amount_style, heading_style, render_scrollable_list};
use crate::app::App;
use crate::export::format_amount;
use crate::i18n::{t, MessageKey};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let lang = app.state.language;
    let form = &app.accommodation;
    let block = Block::default()
        .title(format!(" {} ", t(lang, MessageKey::StepAccommodation)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(inner);

    let items: Vec<ListItem> = form
        .options()
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let mark = if form.selected == Some(idx) { "●" } else { "○" };
            let people = if option.max_roommates > 1 {
                t(lang, MessageKey::People)
            } else {
                t(lang, MessageKey::Person)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{mark} ")),
                Span::styled(option.kind.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    format!("{} {}", format_amount(option.base_price), t(lang, MessageKey::PerMonth)),
                    amount_style(),
                ),
                Span::styled(
                    format!("  ({} {} {})", t(lang, MessageKey::UpTo), option.max_roommates, people),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    render_scrollable_list(frame, chunks[0], List::new(items), form.cursor);

    let Some(price) = form.price_per_person() else {
        return;
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{}: ", t(lang, MessageKey::Roommates)), heading_style()),
            Span::raw(format!("◀ {} ▶  (1-{})", form.roommates, form.max_roommates())),
        ]),
        Line::from(vec![
            Span::raw(format!(
                "{} {} {}: ",
                t(lang, MessageKey::SplitBetween),
                form.roommates,
                t(lang, MessageKey::People).to_lowercase()
            )),
            Span::styled(
                format!(
                    "{} {} {}",
                    format_amount(price),
                    t(lang, MessageKey::PricePerPerson),
                    t(lang, MessageKey::PerMonth)
                ),
                amount_style().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Enter: {}", t(lang, MessageKey::ContinueAccommodation)),
            Style::default().fg(Color::Cyan),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[1]);
}
