//! Summary step view with services and totals

use super::widgets::{amount_style, heading_style};
use crate::app::App;
use crate::domain::catalog::additional_services;
use crate::domain::countries::find_country;
use crate::domain::normalize::{parse_date, to_display};
use crate::export::{format_amount, Totals};
use crate::i18n::{t, Language, MessageKey};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn row(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::raw(value.into()),
    ])
}

fn heading(lang: Language, key: MessageKey) -> Line<'static> {
    Line::from(Span::styled(t(lang, key), heading_style()))
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let lang = app.state.language;
    let block = Block::default()
        .title(format!(" {} ", t(lang, MessageKey::SummaryTitle)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Ok(registration) = app.wizard.registration() else {
        return;
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let student = &registration.student;
    let country = find_country(&student.country)
        .map(|c| c.name(lang).to_string())
        .unwrap_or_else(|| student.country.clone());
    // stored as ISO, shown as DD/MM/YYYY
    let birth_date = parse_date(&student.birth_date)
        .map(to_display)
        .unwrap_or_else(|| student.birth_date.clone());

    let mut left = vec![
        heading(lang, MessageKey::StepPersonalInfo),
        row(t(lang, MessageKey::StudentName), student.full_name()),
        row(t(lang, MessageKey::BirthDate), birth_date),
        row(t(lang, MessageKey::BirthPlace), student.birth_place.clone()),
        row(t(lang, MessageKey::Country), country),
        row(t(lang, MessageKey::Phone), student.phone.clone()),
        row(t(lang, MessageKey::Email), student.email.clone()),
        row(t(lang, MessageKey::ParentName), student.parent_name.clone()),
        row(t(lang, MessageKey::ParentContact), student.parent_contact.clone()),
        Line::from(""),
        heading(lang, MessageKey::StepProgram),
    ];
    let program = &registration.program;
    left.push(row(t(lang, MessageKey::University), program.university()));
    if let Some(city) = program.city() {
        left.push(row(t(lang, MessageKey::City), city));
    }
    left.push(row(t(lang, MessageKey::Country), program.country()));
    left.push(row(t(lang, MessageKey::FieldOfStudy), program.field()));
    if let Some(level) = program.level() {
        left.push(row(t(lang, MessageKey::Level), level.label()));
    }
    if program.tuition_fee() > 0 {
        left.push(row(t(lang, MessageKey::Tuition), format_amount(program.tuition_fee())));
    }
    frame.render_widget(Paragraph::new(left).wrap(Wrap { trim: false }), columns[0]);

    let offered = additional_services();
    let chosen = app.state.chosen_services(offered);
    let totals = Totals::of(&registration, &chosen);

    let mut right = vec![
        heading(lang, MessageKey::StepAccommodation),
        row(t(lang, MessageKey::AccommodationType), registration.accommodation.kind.clone()),
        row(t(lang, MessageKey::Roommates), registration.roommate_count.to_string()),
        Line::from(Span::styled(
            format!(
                "{} {} {}",
                format_amount(totals.monthly_per_person),
                t(lang, MessageKey::PricePerPerson),
                t(lang, MessageKey::PerMonth)
            ),
            amount_style(),
        )),
        Line::from(""),
        heading(lang, MessageKey::Services),
    ];
    for (idx, service) in offered.iter().enumerate() {
        let on = app.state.selected_services.get(idx).copied().unwrap_or(false);
        let style = if on {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        right.push(Line::from(vec![
            Span::styled(
                format!("{} [{}] {}", idx + 1, if on { "x" } else { " " }, service.label),
                style,
            ),
            Span::styled(format!("  {}", format_amount(service.price)), amount_style()),
        ]));
    }
    if chosen.is_empty() {
        right.push(Line::from(Span::styled(
            t(lang, MessageKey::NoServices),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        right.push(row(t(lang, MessageKey::ServicesTotal), format_amount(totals.services)));
    }
    right.push(Line::from(""));
    right.push(heading(lang, MessageKey::AcademicYear));
    right.push(Line::from(vec![
        Span::styled(
            format!("{}: ", t(lang, MessageKey::TotalCost)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format_amount(totals.academic_year),
            amount_style().add_modifier(Modifier::BOLD),
        ),
    ]));
    right.push(Line::from(""));
    right.push(Line::from(Span::styled(
        format!(
            "d: {}   r: {}   b: {}",
            t(lang, MessageKey::Download),
            t(lang, MessageKey::StartNew),
            t(lang, MessageKey::Back)
        ),
        Style::default().fg(Color::Cyan),
    )));
    frame.render_widget(Paragraph::new(right).wrap(Wrap { trim: false }), columns[1]);
}
