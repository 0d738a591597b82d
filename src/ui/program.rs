//! Program step views: catalog list and guided selection

use super::field::{draw_field, FieldView};
use super::widgets::{amount_style, heading_style, render_scrollable_list};
use crate::app::App;
use crate::error::LookupError;
use crate::export::format_amount;
use crate::i18n::{t, Language, MessageKey};
use crate::steps::guided::{Listing, LookupState};
use crate::steps::{CatalogForm, GuidedForm, ProgramStep, SubStep};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let lang = app.state.language;
    let block = Block::default()
        .title(format!(" {} ", t(lang, MessageKey::StepProgram)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &app.program {
        ProgramStep::Catalog(form) => draw_catalog(frame, inner, lang, form),
        ProgramStep::Guided(form) => draw_guided(frame, inner, lang, form),
    }
}

fn draw_catalog(frame: &mut Frame, area: Rect, lang: Language, form: &CatalogForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Length(1), // Field filter
            Constraint::Min(0),    // Programs
        ])
        .split(area);

    draw_field(
        frame,
        chunks[0],
        FieldView {
            label: t(lang, MessageKey::Search),
            value: &form.search,
            is_active: true,
            error: None,
            hint: Some(t(lang, MessageKey::SearchPlaceholder)),
        },
    );

    let mut filter = vec![Span::styled(
        format!(" {}: ", t(lang, MessageKey::FieldOfStudy)),
        heading_style(),
    )];
    let all = t(lang, MessageKey::AllFields);
    let options = std::iter::once(None).chain(form.fields().iter().map(|f| Some(f.as_str())));
    for option in options {
        let active = option == form.field_filter.as_deref();
        let style = if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        filter.push(Span::styled(option.unwrap_or(all).to_string(), style));
        filter.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(filter)), chunks[1]);

    let visible = form.visible();
    if visible.is_empty() {
        let empty = Paragraph::new(t(lang, MessageKey::NoMatches))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[2]);
        return;
    }
    let items: Vec<ListItem> = visible
        .iter()
        .map(|program| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    program.university.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  {}, {}  ·  {}  ·  ",
                    program.city, program.country, program.field
                )),
                Span::styled(
                    format!("{}: {}", t(lang, MessageKey::Tuition), format_amount(program.tuition_fee)),
                    amount_style(),
                ),
            ]))
        })
        .collect();
    render_scrollable_list(frame, chunks[2], List::new(items), form.cursor);
}

fn draw_guided(frame: &mut Frame, area: Rect, lang: Language, form: &GuidedForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SubStep::ALL.len() as u16), // Choices so far
            Constraint::Length(1),
            Constraint::Min(0), // Current sub-step
        ])
        .split(area);

    let choices: Vec<Line> = SubStep::ALL
        .iter()
        .map(|step| {
            let current = *step == form.sub_step;
            let marker = if current { "▶ " } else { "  " };
            let label_style = if current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(format!("{marker}{}: ", t(lang, step.label_key())), label_style),
                Span::raw(form.value(*step).unwrap_or("-").to_string()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(choices), chunks[0]);

    let step = form.sub_step;
    if step.prev().is_some() {
        let modify = format!("^B: {} {}", t(lang, MessageKey::Modify), step_label(lang, step.prev()));
        frame.render_widget(
            Paragraph::new(modify).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    }
    if let Some(text) = &form.manual {
        draw_manual(frame, chunks[2], lang, form, text);
        return;
    }
    match form.lookup(step) {
        Some(LookupState::Loading(_)) => {
            let loading = Paragraph::new(t(lang, MessageKey::Loading))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(loading, chunks[2]);
        }
        Some(LookupState::Failed(e)) => draw_lookup_error(frame, chunks[2], lang, e),
        _ => draw_listing(frame, chunks[2], lang, step, form.listing(step)),
    }
}

fn step_label(lang: Language, step: Option<SubStep>) -> &'static str {
    step.map(|s| t(lang, s.label_key())).unwrap_or_default()
}

fn draw_manual(frame: &mut Frame, area: Rect, lang: Language, form: &GuidedForm, text: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let error = form.lookup(form.sub_step).and_then(LookupState::error);
    let notice = error
        .map(|e| t(lang, e.message_key()))
        .unwrap_or_else(|| t(lang, MessageKey::ManualEntryHint));
    let mut lines = vec![Line::from(Span::styled(
        notice,
        Style::default().fg(Color::Yellow),
    ))];
    if error.is_some_and(LookupError::is_retryable) {
        lines.push(Line::from(format!("^R: {}", t(lang, MessageKey::Retry))));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

    draw_field(
        frame,
        chunks[1],
        FieldView {
            label: t(lang, form.sub_step.label_key()),
            value: text,
            is_active: true,
            error: None,
            hint: Some(t(lang, MessageKey::ManualEntry)),
        },
    );
}

fn draw_lookup_error(frame: &mut Frame, area: Rect, lang: Language, error: &LookupError) {
    let mut lines = vec![Line::from(Span::styled(
        t(lang, error.message_key()),
        Style::default().fg(Color::Red),
    ))];
    if error.is_retryable() {
        lines.push(Line::from(format!("^R: {}", t(lang, MessageKey::Retry))));
    }
    lines.push(Line::from(format!("^E: {}", t(lang, MessageKey::ManualEntry))));
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_listing(frame: &mut Frame, area: Rect, lang: Language, step: SubStep, listing: &Listing) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    draw_field(
        frame,
        chunks[0],
        FieldView {
            label: t(lang, MessageKey::Search),
            value: &listing.search,
            is_active: true,
            error: None,
            hint: step
                .allows_manual()
                .then(|| t(lang, MessageKey::ManualEntryHint)),
        },
    );

    let rows = listing.page_items();
    if rows.is_empty() {
        let empty = Paragraph::new(t(lang, MessageKey::NoMatches))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[1]);
    } else {
        let items: Vec<ListItem> = rows.iter().map(|name| ListItem::new(name.to_string())).collect();
        render_scrollable_list(frame, chunks[1], List::new(items), listing.cursor);
    }

    let pager = format!(
        "◀ {}   {} {}/{}   {} ▶",
        t(lang, MessageKey::Previous),
        t(lang, MessageKey::Page),
        listing.page + 1,
        listing.page_count(),
        t(lang, MessageKey::Next)
    );
    frame.render_widget(
        Paragraph::new(pager).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::directory::{LookupKind, LookupTicket, MockDirectoryLookup};
    use crate::steps::{GuidedEvent, StepForm};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn failed_countries(error: LookupError) -> GuidedForm {
        let ticket = LookupTicket {
            kind: LookupKind::Countries,
            generation: 1,
        };
        GuidedForm::new(None)
            .reduce(GuidedEvent::LookupStarted(ticket))
            .reduce(GuidedEvent::LookupFinished {
                ticket,
                result: Err(error),
            })
    }

    fn render(form: GuidedForm) -> String {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut app = App::with_today(
            AppConfig::default(),
            Arc::new(MockDirectoryLookup::new()),
            today,
        );
        app.program = ProgramStep::Guided(form);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, frame.area(), &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_manual_entry_after_failure_offers_retry() {
        let form = failed_countries(LookupError::Timeout);
        assert!(form.manual.is_some());
        let screen = render(form);
        assert!(screen.contains("^R: Retry"));
        assert!(screen.contains("Enter manually"));
    }

    #[test]
    fn test_manual_entry_after_empty_result_has_no_retry() {
        let form = failed_countries(LookupError::Empty);
        assert!(form.manual.is_some());
        assert!(!render(form).contains("^R:"));
    }
}
