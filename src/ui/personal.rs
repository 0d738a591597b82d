//! Personal-info step view

use super::field::{draw_field, FieldView};
use crate::app::App;
use crate::domain::countries::find_country;
use crate::domain::validation::StudentField;
use crate::i18n::{t, MessageKey};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let lang = app.state.language;
    let block = Block::default()
        .title(format!(" {} ", t(lang, MessageKey::StepPersonalInfo)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    // identity on the left, contact details on the right
    let (left, right) = StudentField::ALL.split_at(5);
    for (column, fields) in [(columns[0], left), (columns[1], right)] {
        let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); fields.len()];
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(column);
        for (row, field) in rows.iter().zip(fields) {
            draw_student_field(frame, *row, app, *field);
        }
    }
}

fn draw_student_field(frame: &mut Frame, area: Rect, app: &App, field: StudentField) {
    let lang = app.state.language;
    let form = &app.personal;
    let is_active = app.state.active_field() == field;

    let value = match field {
        StudentField::Country => {
            let code = &form.student.country;
            match find_country(code) {
                Some(country) => format!("◀ {} ({}) ▶", country.name(lang), country.calling_code),
                None => code.clone(),
            }
        }
        other => form.display_value(other).to_string(),
    };
    let error = form
        .error(field)
        .map(|e| t(lang, e.message_key(field == StudentField::Email)));
    let hint = (field == StudentField::BirthDate).then(|| t(lang, MessageKey::BirthDateHint));

    draw_field(
        frame,
        area,
        FieldView {
            label: t(lang, field.label_key()),
            value: &value,
            is_active,
            error,
            hint,
        },
    );
}
