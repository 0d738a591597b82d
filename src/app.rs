//! Application state and core logic

use crate::config::{AppConfig, ProgramSelector};
use crate::directory::{DirectoryLookup, LookupOutcome, LookupSupervisor};
use crate::domain::catalog::{accommodations, additional_services, programs};
use crate::domain::countries::{next_country, prev_country};
use crate::domain::validation::StudentField;
use crate::domain::ProgramSelection;
use crate::export::{DocumentExporter, ExportRequest, JsonExporter, TextExporter};
use crate::i18n::{t, MessageKey};
use crate::platform::{COPY_KEY, COPY_MODIFIER};
use crate::state::AppState;
use crate::steps::{
    AccommodationEvent, AccommodationForm, CatalogEvent, CatalogForm, GuidedEvent, GuidedForm,
    PersonalEvent, PersonalForm, PickerMove, ProgramEvent, ProgramStep, StepForm, SubStep,
};
use crate::wizard::{Step, StepOutput, Wizard};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

/// Main application struct
pub struct App {
    /// Presentation state
    pub state: AppState,
    pub config: AppConfig,
    pub wizard: Wizard,
    pub personal: PersonalForm,
    pub program: ProgramStep,
    pub accommodation: AccommodationForm,
    supervisor: LookupSupervisor,
    /// Reference shared by every document exported in this session
    reference: Uuid,
    today: NaiveDate,
    /// Whether the app should quit
    quit: bool,
}

/// Apply `event` to the form held in `slot`
fn reduce_in_place<F: StepForm + Clone>(slot: &mut F, event: F::Event) {
    *slot = slot.clone().reduce(event);
}

fn is_ctrl(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

/// `text` with its last character removed
fn backspaced(text: &str) -> String {
    let mut text = text.to_string();
    text.pop();
    text
}

/// `text` with `c` appended
fn typed(text: &str, c: char) -> String {
    let mut text = text.to_string();
    text.push(c);
    text
}

impl App {
    /// Create a new App; must be called inside a Tokio runtime
    pub fn new(config: AppConfig, directory: Arc<dyn DirectoryLookup>) -> Self {
        Self::with_today(config, directory, chrono::Local::now().date_naive())
    }

    pub fn with_today(
        config: AppConfig,
        directory: Arc<dyn DirectoryLookup>,
        today: NaiveDate,
    ) -> Self {
        let supervisor = LookupSupervisor::new(directory, config.lookup_timeout());
        let state = AppState::new(config.language(), additional_services().len());
        let wizard = Wizard::new();
        let personal = PersonalForm::new(None, config.default_country(), today);
        let program = Self::program_form(&config, &wizard);
        Self {
            state,
            wizard,
            personal,
            program,
            accommodation: AccommodationForm::new(accommodations(), None),
            supervisor,
            config,
            reference: Uuid::new_v4(),
            today,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Receiver of finished lookups, for the event loop
    pub fn take_lookup_receiver(&mut self) -> Option<UnboundedReceiver<LookupOutcome>> {
        self.supervisor.take_event_receiver()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    fn tr(&self, key: MessageKey) -> &'static str {
        t(self.state.language, key)
    }

    fn program_form(config: &AppConfig, wizard: &Wizard) -> ProgramStep {
        let previous = wizard.aggregate().program.as_ref();
        match config.program_selector() {
            ProgramSelector::Catalog => {
                let initial = match previous {
                    Some(ProgramSelection::Catalog(program)) => Some(program),
                    _ => None,
                };
                ProgramStep::Catalog(CatalogForm::new(programs(), initial))
            }
            ProgramSelector::Guided => {
                let initial = match previous {
                    Some(ProgramSelection::Guided(program)) => Some(program),
                    _ => None,
                };
                ProgramStep::Guided(GuidedForm::new(initial))
            }
        }
    }

    /// Reseed the form of the step just entered from the aggregate
    fn enter_step(&mut self) {
        let step = self.wizard.current_step();
        if step != Step::Program {
            self.supervisor.cancel_all();
        }
        let draft = self.wizard.aggregate();
        match step {
            Step::PersonalInfo => {
                self.personal =
                    PersonalForm::new(draft.student.as_ref(), self.config.default_country(), self.today);
                self.state.active_form_field = 0;
            }
            Step::Program => {
                self.program = Self::program_form(&self.config, &self.wizard);
                self.dispatch_lookups();
            }
            Step::Accommodation => {
                self.accommodation =
                    AccommodationForm::new(accommodations(), draft.accommodation.as_ref());
            }
            Step::Summary => {}
        }
    }

    /// Hand the entity of a completed form to the wizard
    fn submit(&mut self, output: StepOutput) {
        match self.wizard.advance(output) {
            Ok(_) => self.enter_step(),
            Err(e) => self.state.set_status_error(e.to_string()),
        }
    }

    pub fn go_back(&mut self) {
        let before = self.wizard.current_step();
        if self.wizard.go_back() != before {
            self.enter_step();
        }
    }

    pub fn go_forward(&mut self) {
        match self.wizard.go_forward() {
            Ok(_) => self.enter_step(),
            Err(e) => self.state.set_status_error(e.to_string()),
        }
    }

    pub fn go_to(&mut self, target: Step) {
        if target == self.wizard.current_step() {
            return;
        }
        match self.wizard.go_to(target) {
            Ok(_) => self.enter_step(),
            Err(e) => self.state.set_status_error(e.to_string()),
        }
    }

    /// Discard the registration and start over
    pub fn restart(&mut self) {
        self.wizard.restart();
        self.state.reset();
        self.reference = Uuid::new_v4();
        self.enter_step();
    }

    /// Start the lookups the guided form has queued
    fn dispatch_lookups(&mut self) {
        let requests = match &mut self.program {
            ProgramStep::Guided(form) => form.take_lookup_requests(),
            ProgramStep::Catalog(_) => return,
        };
        for request in requests {
            let ticket = self.supervisor.request(request);
            reduce_in_place(
                &mut self.program,
                ProgramEvent::Guided(GuidedEvent::LookupStarted(ticket)),
            );
        }
    }

    /// Deliver a finished lookup to the guided form
    pub fn handle_lookup(&mut self, outcome: LookupOutcome) {
        if !self.supervisor.is_current(outcome.ticket) {
            tracing::debug!("Ignoring superseded lookup {:?}", outcome.ticket);
            return;
        }
        reduce_in_place(
            &mut self.program,
            ProgramEvent::Guided(GuidedEvent::LookupFinished {
                ticket: outcome.ticket,
                result: outcome.result,
            }),
        );
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.state.status = None;

        if self.handle_global_key(key) {
            return Ok(());
        }

        match self.wizard.current_step() {
            Step::PersonalInfo => self.handle_personal_key(key),
            Step::Program => self.handle_program_key(key),
            Step::Accommodation => self.handle_accommodation_key(key),
            Step::Summary => self.handle_summary_key(key)?,
        }
        Ok(())
    }

    /// Shortcuts available on every step; returns whether the key was used
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = is_ctrl(&key);
        let guided = matches!(self.program, ProgramStep::Guided(_))
            && self.wizard.current_step() == Step::Program;
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('l') if ctrl => {
                self.state.language = self.state.language.toggle();
                tracing::info!("Language switched to {}", self.state.language.code());
            }
            // the guided selector uses Ctrl+arrows for its own sub-steps
            KeyCode::Left if ctrl && !guided => self.go_back(),
            KeyCode::Right if ctrl && !guided => self.go_forward(),
            KeyCode::F(n @ 1..=4) => match Step::from_number(n) {
                Ok(step) => self.go_to(step),
                Err(e) => self.state.set_status_error(e.to_string()),
            },
            _ => return false,
        }
        true
    }

    fn handle_personal_key(&mut self, key: KeyEvent) {
        let field = self.state.active_field();
        let ctrl = is_ctrl(&key);
        let on_date = field == StudentField::BirthDate;

        let event = match key.code {
            KeyCode::Tab => {
                self.state.next_form_field();
                return;
            }
            KeyCode::BackTab => {
                self.state.prev_form_field();
                return;
            }
            KeyCode::Enter => PersonalEvent::Submit,
            KeyCode::Left if field == StudentField::Country => {
                PersonalEvent::SelectCountry(prev_country(&self.personal.student.country).into())
            }
            KeyCode::Right if field == StudentField::Country => {
                PersonalEvent::SelectCountry(next_country(&self.personal.student.country).into())
            }
            KeyCode::Up if on_date && ctrl => PersonalEvent::MovePicker(PickerMove::Years(1)),
            KeyCode::Down if on_date && ctrl => PersonalEvent::MovePicker(PickerMove::Years(-1)),
            KeyCode::Up if on_date => PersonalEvent::MovePicker(PickerMove::Days(1)),
            KeyCode::Down if on_date => PersonalEvent::MovePicker(PickerMove::Days(-1)),
            KeyCode::PageUp if on_date => PersonalEvent::MovePicker(PickerMove::Months(1)),
            KeyCode::PageDown if on_date => PersonalEvent::MovePicker(PickerMove::Months(-1)),
            KeyCode::Home if on_date => PersonalEvent::DatePicked(self.personal.picker.min),
            KeyCode::End if on_date => PersonalEvent::DatePicked(self.personal.picker.max),
            KeyCode::Char(c) if on_date && !ctrl => {
                PersonalEvent::DateText(typed(&self.personal.date.text, c))
            }
            KeyCode::Backspace if on_date => {
                PersonalEvent::DateText(backspaced(&self.personal.date.text))
            }
            KeyCode::Up => {
                self.state.prev_form_field();
                return;
            }
            KeyCode::Down => {
                self.state.next_form_field();
                return;
            }
            KeyCode::Char(c) if !ctrl && field != StudentField::Country => PersonalEvent::Input {
                field,
                value: typed(self.personal.display_value(field), c),
            },
            KeyCode::Backspace if field != StudentField::Country => PersonalEvent::Input {
                field,
                value: backspaced(self.personal.display_value(field)),
            },
            _ => return,
        };

        let submitted = event == PersonalEvent::Submit;
        reduce_in_place(&mut self.personal, event);

        if let Some(student) = self.personal.completed() {
            self.submit(StepOutput::Student(student));
        } else if submitted {
            // jump to the first field that needs attention
            if let Some(idx) = StudentField::ALL
                .iter()
                .position(|f| self.personal.errors.contains_key(f))
            {
                self.state.active_form_field = idx;
            }
        }
    }

    fn handle_program_key(&mut self, key: KeyEvent) {
        let event = match &self.program {
            ProgramStep::Catalog(form) => match Self::catalog_event(form, &key) {
                Some(e) => ProgramEvent::Catalog(e),
                None => return,
            },
            ProgramStep::Guided(form) => match Self::guided_event(form, &key) {
                Some(e) => ProgramEvent::Guided(e),
                None => return,
            },
        };
        let selects_level = matches!(
            (&self.program, &event),
            (ProgramStep::Guided(form), ProgramEvent::Guided(GuidedEvent::Select | GuidedEvent::Choose(_)))
                if form.sub_step == SubStep::Level
        );
        reduce_in_place(&mut self.program, event);
        if selects_level {
            // picking a level finishes the guided selection
            reduce_in_place(&mut self.program, ProgramEvent::Guided(GuidedEvent::Next));
        }
        self.after_program_event();
    }

    fn catalog_event(form: &CatalogForm, key: &KeyEvent) -> Option<CatalogEvent> {
        let event = match key.code {
            KeyCode::Tab => CatalogEvent::CycleField,
            KeyCode::Up => CatalogEvent::MoveUp,
            KeyCode::Down => CatalogEvent::MoveDown,
            KeyCode::Enter => CatalogEvent::Select,
            KeyCode::Esc => CatalogEvent::Search(String::new()),
            KeyCode::Backspace => CatalogEvent::Search(backspaced(&form.search)),
            KeyCode::Char(c) if !is_ctrl(key) => CatalogEvent::Search(typed(&form.search, c)),
            _ => return None,
        };
        Some(event)
    }

    fn guided_event(form: &GuidedForm, key: &KeyEvent) -> Option<GuidedEvent> {
        let step = form.sub_step;
        let event = if is_ctrl(key) {
            match key.code {
                KeyCode::Char('e') => GuidedEvent::ToggleManual,
                KeyCode::Char('r') => GuidedEvent::Retry,
                KeyCode::Char('b') => GuidedEvent::Modify(step.prev().unwrap_or(step)),
                KeyCode::Left => GuidedEvent::Prev,
                KeyCode::Right => GuidedEvent::Next,
                _ => return None,
            }
        } else if let Some(text) = &form.manual {
            match key.code {
                KeyCode::Enter => GuidedEvent::Choose(text.clone()),
                KeyCode::Esc => GuidedEvent::ToggleManual,
                KeyCode::Backspace => GuidedEvent::ManualText(backspaced(text)),
                KeyCode::Char(c) => GuidedEvent::ManualText(typed(text, c)),
                _ => return None,
            }
        } else {
            let search = &form.listing(step).search;
            match key.code {
                KeyCode::Up => GuidedEvent::MoveUp,
                KeyCode::Down => GuidedEvent::MoveDown,
                KeyCode::Left => GuidedEvent::PrevPage,
                KeyCode::Right => GuidedEvent::NextPage,
                KeyCode::Enter => GuidedEvent::Select,
                KeyCode::Esc => GuidedEvent::Search(String::new()),
                KeyCode::Backspace => GuidedEvent::Search(backspaced(search)),
                KeyCode::Char(c) => GuidedEvent::Search(typed(search, c)),
                _ => return None,
            }
        };
        Some(event)
    }

    fn after_program_event(&mut self) {
        self.dispatch_lookups();
        if let ProgramStep::Guided(form) = &mut self.program {
            if form.take_back_request() {
                self.go_back();
                return;
            }
        }
        if let Some(selection) = self.program.completed() {
            self.submit(StepOutput::Program(selection));
        }
    }

    fn handle_accommodation_key(&mut self, key: KeyEvent) {
        let event = match key.code {
            KeyCode::Up => AccommodationEvent::MoveUp,
            KeyCode::Down => AccommodationEvent::MoveDown,
            KeyCode::Home => AccommodationEvent::Choose(0),
            KeyCode::End => {
                AccommodationEvent::Choose(self.accommodation.options().len().saturating_sub(1))
            }
            KeyCode::Left | KeyCode::Char('-') => AccommodationEvent::Decrement,
            KeyCode::Right | KeyCode::Char('+') => AccommodationEvent::Increment,
            KeyCode::Char(c @ '1'..='9') => {
                AccommodationEvent::SetRoommates(c.to_digit(10).unwrap_or(1) as u8)
            }
            KeyCode::Enter => AccommodationEvent::Submit,
            _ => return,
        };
        reduce_in_place(&mut self.accommodation, event);
        if let Some(choice) = self.accommodation.completed() {
            self.submit(StepOutput::Accommodation(choice));
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(COPY_MODIFIER) && key.code == KeyCode::Char(COPY_KEY) {
            match self.summary_text().and_then(|text| self.copy_to_clipboard(&text)) {
                Ok(()) => {
                    let message = self.tr(MessageKey::Copied);
                    self.state.set_status(message);
                }
                Err(e) => self.push_error(format!("Failed to copy summary: {}", e)),
            }
            return Ok(());
        }
        match key.code {
            KeyCode::Char('d') => self.export(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('b') | KeyCode::Esc => self.go_to(Step::Accommodation),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c.to_digit(10).unwrap_or(1) as usize - 1;
                self.state.toggle_service(idx);
            }
            _ => {}
        }
        Ok(())
    }

    /// Registration rendered as the text document
    fn summary_text(&self) -> Result<String> {
        let registration = self.wizard.registration()?;
        let services = self.state.chosen_services(additional_services());
        let request = ExportRequest {
            registration: &registration,
            services: &services,
            language: self.state.language,
        };
        Ok(TextExporter.render(&request, self.reference, self.today)?)
    }

    /// Write the text and JSON documents into the export directory
    pub fn export(&mut self) {
        let registration = match self.wizard.registration() {
            Ok(r) => r,
            Err(e) => {
                self.state.set_status_error(e.to_string());
                return;
            }
        };
        let services = self.state.chosen_services(additional_services());
        let request = ExportRequest {
            registration: &registration,
            services: &services,
            language: self.state.language,
        };
        let dir = self.config.export_dir();
        let exporters: [&dyn DocumentExporter; 2] = [&TextExporter, &JsonExporter];

        let mut written = Vec::new();
        for exporter in exporters {
            match exporter.export(&request, &dir, self.reference, self.today) {
                Ok(path) => written.push(path.display().to_string()),
                Err(e) => {
                    self.push_error(e.to_string());
                    return;
                }
            }
        }
        let message = format!("{} {}", self.tr(MessageKey::Exported), written.join(", "));
        self.state.set_status(message);
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{LookupKind, MockDirectoryLookup};
    use crate::error::LookupError;
    use crate::steps::guided::LookupState;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn status_text(app: &App) -> Option<&str> {
        app.state.status.as_ref().map(|s| s.text.as_str())
    }

    fn app_with(config: AppConfig, directory: MockDirectoryLookup) -> App {
        App::with_today(config, Arc::new(directory), today())
    }

    fn catalog_app() -> App {
        app_with(AppConfig::default(), MockDirectoryLookup::new())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    /// Fill the personal form through the keyboard and submit it
    fn fill_personal(app: &mut App) {
        let values = [
            "Amélie",
            "Kouam",
            "12052004",
            "Douala",
            "",
            "699001122",
            "amelie@example.org",
            "Jean Kouam",
            "+237677889900",
        ];
        for value in values {
            type_text(app, value);
            app.handle_key(key(KeyCode::Tab)).unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).unwrap();
    }

    fn at_summary() -> App {
        let mut app = catalog_app();
        fill_personal(&mut app);
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Char('4'))).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app
    }

    #[test]
    fn test_personal_form_through_keyboard() {
        let mut app = catalog_app();
        fill_personal(&mut app);

        assert_eq!(app.wizard.current_step(), Step::Program);
        let student = app.wizard.aggregate().student.clone().unwrap();
        assert_eq!(student.first_name, "Amélie");
        assert_eq!(student.birth_date, "2004-05-12");
        assert_eq!(student.phone, "+237699001122");
        assert_eq!(student.country, "CM");
    }

    #[test]
    fn test_invalid_submit_focuses_first_error() {
        let mut app = catalog_app();
        type_text(&mut app, "Amélie");
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.wizard.current_step(), Step::PersonalInfo);
        assert_eq!(app.state.active_field(), StudentField::LastName);
        assert!(app.personal.error(StudentField::Email).is_some());
    }

    #[test]
    fn test_country_arrows_cycle_and_rewrite_phone() {
        let mut app = catalog_app();
        app.state.active_form_field = 5;
        type_text(&mut app, "699");
        assert_eq!(app.personal.student.phone, "+237699");

        app.state.active_form_field = 4;
        app.handle_key(key(KeyCode::Right)).unwrap();
        assert_ne!(app.personal.student.country, "CM");
        assert!(!app.personal.student.phone.starts_with("+237"));
    }

    #[test]
    fn test_birth_date_keys_type_and_pick_bounds() {
        let mut app = catalog_app();
        app.state.active_form_field = StudentField::ALL
            .iter()
            .position(|f| *f == StudentField::BirthDate)
            .unwrap();
        type_text(&mut app, "120520");
        assert_eq!(app.personal.date.text, "12/05/20");
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.personal.date.text, "12/05/2");

        app.handle_key(key(KeyCode::Home)).unwrap();
        assert_eq!(app.personal.student.birth_date, "1926-10-16");
        assert_eq!(app.personal.error(StudentField::BirthDate), None);

        app.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(app.personal.student.birth_date, "2026-10-16");
        assert!(app.personal.error(StudentField::BirthDate).is_some());
    }

    #[test]
    fn test_accommodation_home_and_end_choose_first_and_last() {
        let mut app = catalog_app();
        fill_personal(&mut app);
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.wizard.current_step(), Step::Accommodation);

        app.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(app.accommodation.selected, Some(3));
        app.handle_key(key(KeyCode::Home)).unwrap();
        assert_eq!(app.accommodation.selected, Some(0));
        assert_eq!(app.accommodation.roommates, 1);
    }

    #[test]
    fn test_full_catalog_run_to_summary() {
        let app = at_summary();
        assert_eq!(app.wizard.current_step(), Step::Summary);
        let registration = app.wizard.registration().unwrap();
        assert_eq!(registration.program.university(), "Sorbonne University");
        assert_eq!(registration.accommodation.kind, "Shared Apartment");
        assert_eq!(registration.roommate_count, 4);
    }

    #[test]
    fn test_forward_gate_reports_in_status_bar() {
        let mut app = catalog_app();
        app.handle_key(ctrl(KeyCode::Right)).unwrap();
        assert_eq!(app.wizard.current_step(), Step::PersonalInfo);
        assert_eq!(status_text(&app), Some("step 1 is not complete yet"));
        assert!(app.state.status.as_ref().unwrap().is_error);
        assert!(!app.state.has_errors());

        // the next key clears it
        app.handle_key(key(KeyCode::Char('A'))).unwrap();
        assert_eq!(app.state.status, None);
    }

    #[test]
    fn test_error_dialog_swallows_keys_until_dismissed() {
        let mut app = catalog_app();
        app.push_error("failed to write registration document");
        app.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.personal.student.first_name, "");
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!app.state.has_errors());
        app.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.personal.student.first_name, "x");
    }

    #[test]
    fn test_function_keys_follow_jump_rules() {
        let mut app = at_summary();
        app.handle_key(key(KeyCode::F(1))).unwrap();
        assert_eq!(app.wizard.current_step(), Step::PersonalInfo);
        assert_eq!(app.personal.student.first_name, "Amélie");

        app.handle_key(key(KeyCode::F(3))).unwrap();
        assert_eq!(app.wizard.current_step(), Step::PersonalInfo);
        assert_eq!(status_text(&app), Some("cannot jump from step 1 to step 3"));

        app.handle_key(key(KeyCode::F(2))).unwrap();
        assert_eq!(app.wizard.current_step(), Step::Program);
    }

    #[test]
    fn test_back_from_summary_keeps_choice() {
        let mut app = at_summary();
        app.handle_key(key(KeyCode::Char('b'))).unwrap();
        assert_eq!(app.wizard.current_step(), Step::Accommodation);
        assert_eq!(app.accommodation.selected, Some(2));
        assert_eq!(app.accommodation.roommates, 4);
    }

    #[test]
    fn test_language_toggle() {
        let mut app = catalog_app();
        app.handle_key(ctrl(KeyCode::Char('l'))).unwrap();
        assert_eq!(app.state.language, crate::i18n::Language::Fr);
    }

    #[test]
    fn test_restart_clears_registration_and_services() {
        let mut app = at_summary();
        app.handle_key(key(KeyCode::Char('1'))).unwrap();
        assert!(app.state.selected_services[0]);

        app.handle_key(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(app.wizard.current_step(), Step::PersonalInfo);
        assert!(app.wizard.aggregate().is_empty());
        assert!(!app.state.selected_services[0]);
        assert_eq!(app.personal.student.first_name, "");
    }

    #[test]
    fn test_export_writes_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = at_summary();
        app.config.export_dir = Some(dir.path().to_path_buf());
        app.handle_key(key(KeyCode::Char('2'))).unwrap();
        app.handle_key(key(KeyCode::Char('d'))).unwrap();

        assert!(!app.state.has_errors());
        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with(".json"));
        assert!(names[1].ends_with(".txt"));
        // both documents share the session reference
        assert_eq!(names[0].trim_end_matches(".json"), names[1].trim_end_matches(".txt"));
        assert!(app
            .state
            .status
            .as_ref()
            .map(|s| s.text.as_str())
            .unwrap()
            .starts_with("Registration form saved to"));
    }

    fn guided_config() -> AppConfig {
        AppConfig {
            program_selector: Some(ProgramSelector::Guided),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_guided_run_with_lookups() {
        let mut directory = MockDirectoryLookup::new();
        directory
            .expect_list_countries()
            .returning(|| Ok(vec!["Canada".into(), "France".into()]));
        directory
            .expect_list_universities()
            .withf(|country: &str| country == "France")
            .returning(|_| Ok(vec!["Sorbonne University".into()]));

        let mut app = app_with(guided_config(), directory);
        let mut rx = app.take_lookup_receiver().unwrap();
        fill_personal(&mut app);
        assert_eq!(app.wizard.current_step(), Step::Program);

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.ticket.kind, LookupKind::Countries);
        app.handle_lookup(outcome);

        type_text(&mut app, "fra");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        let outcome = rx.recv().await.unwrap();
        app.handle_lookup(outcome);

        // university, then field by manual entry, then level
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(ctrl(KeyCode::Char('e'))).unwrap();
        type_text(&mut app, "Medicine");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.wizard.current_step(), Step::Accommodation);
        match app.wizard.aggregate().program.clone() {
            Some(ProgramSelection::Guided(program)) => {
                assert_eq!(program.country, "France");
                assert_eq!(program.university, "Sorbonne University");
                assert_eq!(program.field, "Medicine");
                assert_eq!(program.level.label(), "Master");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_guided_failure_opens_manual_entry_and_prev_leaves_step() {
        let mut directory = MockDirectoryLookup::new();
        directory
            .expect_list_countries()
            .returning(|| Err(LookupError::Failed("503".into())));

        let mut app = app_with(guided_config(), directory);
        let mut rx = app.take_lookup_receiver().unwrap();
        fill_personal(&mut app);
        let outcome = rx.recv().await.unwrap();
        app.handle_lookup(outcome);

        let ProgramStep::Guided(form) = &app.program else {
            panic!("guided selector expected");
        };
        assert!(matches!(form.country_lookup, LookupState::Failed(_)));
        assert_eq!(form.manual.as_deref(), Some(""));

        app.handle_key(ctrl(KeyCode::Left)).unwrap();
        assert_eq!(app.wizard.current_step(), Step::PersonalInfo);
    }
}
