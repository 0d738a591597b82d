//! Presentation state that lives outside the step forms

use crate::domain::validation::StudentField;
use crate::domain::AdditionalService;
use crate::i18n::Language;
use std::collections::VecDeque;

/// One-line message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Per-session UI state: focus, service toggles, queued errors and the
/// status line
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub language: Language,
    /// Index into [`StudentField::ALL`]
    pub active_form_field: usize,
    /// One flag per additional service offered on the summary
    pub selected_services: Vec<bool>,
    error_queue: VecDeque<String>,
    pub status: Option<StatusLine>,
}

impl AppState {
    pub fn new(language: Language, service_count: usize) -> Self {
        Self {
            language,
            selected_services: vec![false; service_count],
            ..Default::default()
        }
    }

    /// Field of the personal form that receives typing
    pub fn active_field(&self) -> StudentField {
        StudentField::ALL[self.active_form_field % StudentField::ALL.len()]
    }

    /// Move to next form field
    pub fn next_form_field(&mut self) {
        self.active_form_field = (self.active_form_field + 1) % StudentField::ALL.len();
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        if self.active_form_field == 0 {
            self.active_form_field = StudentField::ALL.len() - 1;
        } else {
            self.active_form_field -= 1;
        }
    }

    /// Flip service `idx`; out-of-range indexes are ignored
    pub fn toggle_service(&mut self, idx: usize) {
        if let Some(flag) = self.selected_services.get_mut(idx) {
            *flag = !*flag;
        }
    }

    /// Services from `offered` whose flag is set, in catalog order
    pub fn chosen_services(&self, offered: &[AdditionalService]) -> Vec<AdditionalService> {
        offered
            .iter()
            .zip(&self.selected_services)
            .filter(|(_, &on)| on)
            .map(|(service, _)| service.clone())
            .collect()
    }

    /// Back to a blank session, keeping the language
    pub fn reset(&mut self) {
        *self = Self::new(self.language, self.selected_services.len());
    }

    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.error_queue.push_back(message);
    }

    /// Error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Close the dialog; the next queued error, if any, takes its place
    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(StatusLine {
            text: message.into(),
            is_error: false,
        });
    }

    /// Rejected action; shown in the status bar rather than the dialog
    pub fn set_status_error(&mut self, message: impl Into<String>) {
        let text = message.into();
        tracing::info!("Rejected: {}", text);
        self.status = Some(StatusLine {
            text,
            is_error: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::additional_services;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_form_field_navigation_wraps() {
        let mut state = AppState::new(Language::En, 0);
        assert_eq!(state.active_field(), StudentField::ALL[0]);
        state.prev_form_field();
        assert_eq!(state.active_field(), StudentField::ALL[8]);
        state.next_form_field();
        assert_eq!(state.active_field(), StudentField::ALL[0]);
    }

    #[test]
    fn test_errors_are_shown_in_order() {
        let mut state = AppState::default();
        state.push_error("first".into());
        state.push_error("second".into());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_service_toggles() {
        let offered = additional_services();
        let mut state = AppState::new(Language::Fr, offered.len());
        state.toggle_service(2);
        state.toggle_service(0);
        state.toggle_service(0);
        state.toggle_service(99);
        let chosen = state.chosen_services(offered);
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].id, offered[2].id);

        state.reset();
        assert!(state.chosen_services(offered).is_empty());
        assert_eq!(state.language, Language::Fr);
    }
}
