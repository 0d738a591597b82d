//! Layout components (header, stepper, status bar)

use super::components::{render_step_button, StepStatus, BUTTON_HEIGHT};
use crate::app::App;
use crate::i18n::{t, MessageKey};
use crate::platform::COPY_SHORTCUT;
use crate::steps::ProgramStep;
use crate::wizard::Step;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Title
            Constraint::Length(BUTTON_HEIGHT), // Stepper
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    let header = Rect {
        height: chunks[0].height + chunks[1].height,
        ..chunks[0]
    };
    (header, chunks[2], chunks[3])
}

/// Draw the title line and the four-step stepper
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let lang = app.state.language;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(BUTTON_HEIGHT)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", t(lang, MessageKey::Title)),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", lang.code()),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), rows[0]);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);

    let current = app.wizard.current_step();
    for (idx, step) in Step::ALL.iter().enumerate() {
        render_step_button(
            frame,
            cells[idx],
            step.number(),
            t(lang, step.label_key()),
            step_status(*step, current),
        );
    }
}

fn step_status(step: Step, current: Step) -> StepStatus {
    match step.cmp(&current) {
        std::cmp::Ordering::Less => StepStatus::Completed,
        std::cmp::Ordering::Equal => StepStatus::Current,
        std::cmp::Ordering::Greater => StepStatus::Pending,
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    // Step-specific hints
    let hints = get_step_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    // Status message
    if let Some(status) = &app.state.status {
        let color = if status.is_error { Color::Red } else { Color::Green };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(status.text.as_str(), Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^L:lang  ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        width: (quit_hint.len() as u16).min(area.width),
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current step
fn get_step_hints(app: &App) -> String {
    match app.wizard.current_step() {
        Step::PersonalInfo => {
            "Tab:next  ←/→:country  ↑/↓ PgUp/PgDn ^↑/↓ Home/End:date  Enter:continue  ^→:forward"
                .to_string()
        }
        Step::Program => match &app.program {
            ProgramStep::Catalog(_) => {
                "type:search  Tab:field  ↑/↓:move  Enter:select  ^←:back".to_string()
            }
            ProgramStep::Guided(form) if form.manual.is_some() => {
                "type:value  Enter:confirm  Esc:list  ^B:modify  ^←:back".to_string()
            }
            ProgramStep::Guided(_) => {
                "type:search  ↑/↓:move  ←/→:page  Enter:select  ^E:manual  ^R:retry  ^B:modify  ^←/^→:sub-step"
                    .to_string()
            }
        },
        Step::Accommodation => {
            "↑/↓ Home/End:option  ←/→:roommates  Enter:continue  ^←:back".to_string()
        }
        Step::Summary => format!(
            "1-3:services  d:download  {}:copy  b:back  r:restart",
            COPY_SHORTCUT
        ),
    }
}
