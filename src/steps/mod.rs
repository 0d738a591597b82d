//! Step forms.
//!
//! Each form is a pure reducer: `reduce(self, event)` returns the next state.
//! A form starts `Editing` and becomes `Complete` once it holds a valid entity,
//! which the app then hands to the wizard.

pub mod accommodation;
pub mod catalog;
pub mod guided;
pub mod personal;

use crate::domain::ProgramSelection;
pub use accommodation::{AccommodationEvent, AccommodationForm};
pub use catalog::{CatalogEvent, CatalogForm};
pub use guided::{GuidedEvent, GuidedForm, SubStep};
pub use personal::{PersonalEvent, PersonalForm, PickerMove};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Complete,
}

/// Common contract of the step forms
pub trait StepForm: Sized {
    type Event;
    type Output;

    fn reduce(self, event: Self::Event) -> Self;

    fn phase(&self) -> FormPhase;

    /// Entity the form currently holds, complete or not
    fn entity(&self) -> Option<Self::Output>;

    fn is_complete(&self) -> bool {
        self.phase() == FormPhase::Complete
    }

    /// Entity produced by the form, once complete
    fn completed(&self) -> Option<Self::Output> {
        if self.is_complete() {
            self.entity()
        } else {
            None
        }
    }
}

/// Event for whichever program selector is active
#[derive(Debug, Clone)]
pub enum ProgramEvent {
    Catalog(CatalogEvent),
    Guided(GuidedEvent),
}

/// The program step, run with the selector chosen for the deployment
#[derive(Debug, Clone)]
pub enum ProgramStep {
    Catalog(CatalogForm),
    Guided(GuidedForm),
}

impl StepForm for ProgramStep {
    type Event = ProgramEvent;
    type Output = ProgramSelection;

    fn reduce(self, event: ProgramEvent) -> Self {
        match (self, event) {
            (Self::Catalog(form), ProgramEvent::Catalog(e)) => Self::Catalog(form.reduce(e)),
            (Self::Guided(form), ProgramEvent::Guided(e)) => Self::Guided(form.reduce(e)),
            (step, event) => {
                tracing::debug!("Ignoring {:?} for the active program selector", event);
                step
            }
        }
    }

    fn phase(&self) -> FormPhase {
        match self {
            Self::Catalog(form) => form.phase(),
            Self::Guided(form) => form.phase(),
        }
    }

    fn entity(&self) -> Option<ProgramSelection> {
        match self {
            Self::Catalog(form) => form.entity().map(ProgramSelection::Catalog),
            Self::Guided(form) => form.entity().map(ProgramSelection::Guided),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{accommodations, programs};
    use crate::domain::AccommodationChoice;

    #[test]
    fn test_program_step_wraps_catalog_output() {
        let step = ProgramStep::Catalog(CatalogForm::new(programs(), None));
        assert!(step.completed().is_none());

        let step = step.reduce(ProgramEvent::Catalog(CatalogEvent::Select));
        assert!(step.is_complete());
        match step.completed() {
            Some(ProgramSelection::Catalog(program)) => assert_eq!(program.id, "1"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_seeded_entity_is_not_completed_until_submitted() {
        let previous = AccommodationChoice {
            accommodation: accommodations()[1].clone(),
            roommate_count: 2,
        };
        let form = AccommodationForm::new(accommodations(), Some(&previous));
        assert_eq!(form.entity(), Some(previous.clone()));
        assert!(!form.is_complete());
        assert!(form.completed().is_none());

        let form = form.reduce(AccommodationEvent::Submit);
        assert_eq!(form.completed(), Some(previous));
    }

    #[test]
    fn test_mismatched_event_is_ignored() {
        let step = ProgramStep::Catalog(CatalogForm::new(programs(), None));
        let step = step.reduce(ProgramEvent::Guided(GuidedEvent::Next));
        assert_eq!(step.phase(), FormPhase::Editing);
    }
}
