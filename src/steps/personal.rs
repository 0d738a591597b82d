//! Personal-info form

use super::{FormPhase, StepForm};
use crate::domain::countries::{calling_code, find_country};
use crate::domain::normalize::{
    normalize_phone_input, on_country_change, restrict_phone_chars, DateInput, DatePicker,
};
use crate::domain::validation::{validate, validate_student, StudentField};
use crate::domain::Student;
use crate::error::FieldError;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Picker navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMove {
    Days(i64),
    Months(i32),
    Years(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalEvent {
    Input { field: StudentField, value: String },
    SelectCountry(String),
    DateText(String),
    DatePicked(NaiveDate),
    MovePicker(PickerMove),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalForm {
    pub student: Student,
    pub errors: BTreeMap<StudentField, FieldError>,
    pub date: DateInput,
    pub picker: DatePicker,
    phase: FormPhase,
    today: NaiveDate,
}

impl PersonalForm {
    /// Fresh form, or one seeded from a previously submitted student
    pub fn new(initial: Option<&Student>, default_country: &str, today: NaiveDate) -> Self {
        let student = initial
            .cloned()
            .unwrap_or_else(|| Student::with_country(default_country));
        let date = DateInput::from_iso(&student.birth_date);
        let picker = DatePicker::new(today, date.canonical);
        Self {
            student,
            errors: BTreeMap::new(),
            date,
            picker,
            phase: FormPhase::Editing,
            today,
        }
    }

    pub fn error(&self, field: StudentField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Text shown in the input for `field`
    pub fn display_value(&self, field: StudentField) -> &str {
        match field {
            StudentField::BirthDate => &self.date.text,
            other => other.value(&self.student),
        }
    }

    fn revalidate(&mut self, field: StudentField) {
        let result = validate(field, field.value(&self.student), self.today);
        match result {
            Ok(()) => self.errors.remove(&field),
            Err(e) => self.errors.insert(field, e),
        };
    }

    fn set_field(&mut self, field: StudentField, value: String) {
        match field {
            StudentField::Country => self.select_country(&value),
            StudentField::BirthDate => self.date_text(&value),
            StudentField::Phone => {
                let code = calling_code(&self.student.country);
                self.student.phone = normalize_phone_input(&value, code);
                self.revalidate(field);
            }
            StudentField::ParentContact => {
                // keystrokes other than digits and '+' are dropped
                if let Some(value) = restrict_phone_chars(&value) {
                    self.student.parent_contact = value;
                    self.revalidate(field);
                }
            }
            _ => {
                *field.value_mut(&mut self.student) = value;
                self.revalidate(field);
            }
        }
    }

    fn select_country(&mut self, code: &str) {
        if find_country(code).is_none() {
            tracing::debug!("Ignoring unknown country code {}", code);
            return;
        }
        let old = calling_code(&self.student.country);
        let phone = on_country_change(&self.student.phone, old, calling_code(code));
        self.student.country = code.to_string();
        if phone != self.student.phone {
            self.student.phone = phone;
            self.revalidate(StudentField::Phone);
        }
    }

    fn date_text(&mut self, raw: &str) {
        self.date.on_text(raw);
        self.student.birth_date = self.date.iso();
        match (self.date.error, self.date.canonical) {
            (Some(e), _) => {
                self.errors.insert(StudentField::BirthDate, e);
            }
            (None, Some(date)) => {
                if self.picker.contains(date) {
                    self.picker.selected = date;
                }
                self.revalidate(StudentField::BirthDate);
            }
            (None, None) => {
                self.errors.remove(&StudentField::BirthDate);
            }
        }
    }

    fn date_picked(&mut self, date: NaiveDate) {
        self.picker = DatePicker::new(self.today, Some(date));
        self.date.on_pick(self.picker.selected);
        self.student.birth_date = self.date.iso();
        self.revalidate(StudentField::BirthDate);
    }

    fn submit(&mut self) {
        self.errors = validate_student(&self.student, self.today);
        if self.errors.is_empty() {
            self.phase = FormPhase::Complete;
        } else {
            tracing::debug!("Personal info rejected: {:?}", self.errors.keys());
        }
    }
}

impl StepForm for PersonalForm {
    type Event = PersonalEvent;
    type Output = Student;

    fn reduce(mut self, event: PersonalEvent) -> Self {
        if !matches!(event, PersonalEvent::Submit) {
            self.phase = FormPhase::Editing;
        }
        match event {
            PersonalEvent::Input { field, value } => self.set_field(field, value),
            PersonalEvent::SelectCountry(code) => self.select_country(&code),
            PersonalEvent::DateText(raw) => self.date_text(&raw),
            PersonalEvent::DatePicked(date) => self.date_picked(date),
            PersonalEvent::MovePicker(step) => {
                let mut picker = self.picker;
                match step {
                    PickerMove::Days(n) => picker.shift_days(n),
                    PickerMove::Months(n) => picker.shift_months(n),
                    PickerMove::Years(n) => picker.shift_years(n),
                }
                self.date_picked(picker.selected);
            }
            PersonalEvent::Submit => self.submit(),
        }
        self
    }

    fn phase(&self) -> FormPhase {
        self.phase
    }

    fn entity(&self) -> Option<Student> {
        Some(self.student.clone())
    }
}
