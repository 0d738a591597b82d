//! Top-level registration wizard.
//!
//! The wizard owns the in-progress registration and the current step. Each
//! step's entity is merged and the step advanced in the same call, so the pair
//! is never observed out of sync. Going back never discards anything; only
//! [`Wizard::restart`] clears the registration.

use crate::domain::{AccommodationChoice, ProgramSelection, Registration, RegistrationDraft, Student};
use crate::error::WizardError;
use crate::i18n::MessageKey;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    PersonalInfo = 1,
    Program = 2,
    Accommodation = 3,
    Summary = 4,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Self::PersonalInfo,
        Self::Program,
        Self::Accommodation,
        Self::Summary,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Result<Self, WizardError> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.number() == n)
            .ok_or(WizardError::OutOfRange(n))
    }

    pub fn next(&self) -> Option<Step> {
        Self::from_number(self.number() + 1).ok()
    }

    pub fn prev(&self) -> Option<Step> {
        self.number()
            .checked_sub(1)
            .and_then(|n| Self::from_number(n).ok())
    }

    pub fn label_key(&self) -> MessageKey {
        match self {
            Self::PersonalInfo => MessageKey::StepPersonalInfo,
            Self::Program => MessageKey::StepProgram,
            Self::Accommodation => MessageKey::StepAccommodation,
            Self::Summary => MessageKey::StepSummary,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Entity emitted by a completed step form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutput {
    Student(Student),
    Program(ProgramSelection),
    Accommodation(AccommodationChoice),
}

impl StepOutput {
    /// Step that produces this entity
    pub fn step(&self) -> Step {
        match self {
            Self::Student(_) => Step::PersonalInfo,
            Self::Program(_) => Step::Program,
            Self::Accommodation(_) => Step::Accommodation,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Student(_) => "student",
            Self::Program(_) => "program",
            Self::Accommodation(_) => "accommodation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    step: Step,
    draft: RegistrationDraft,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: Step::PersonalInfo,
            draft: RegistrationDraft::default(),
        }
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn aggregate(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Whether the entity of the current step is present
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::PersonalInfo => self.draft.student.is_some(),
            Step::Program => self.draft.program.is_some(),
            Step::Accommodation => self.draft.accommodation.is_some(),
            Step::Summary => false,
        }
    }

    /// Merge the current step's entity and move to the next step
    pub fn advance(&mut self, output: StepOutput) -> Result<Step, WizardError> {
        let next = self.step.next().ok_or(WizardError::AtFinalStep)?;
        if output.step() != self.step {
            return Err(WizardError::UnexpectedEntity {
                step: self.step,
                entity: output.name(),
            });
        }
        match output {
            StepOutput::Student(student) => self.draft.student = Some(student),
            StepOutput::Program(program) => self.draft.program = Some(program),
            StepOutput::Accommodation(choice) => self.draft.accommodation = Some(choice),
        }
        info!("Wizard step {} -> {}", self.step, next);
        self.step = next;
        Ok(next)
    }

    /// Move to the next step without a new entity; gated on the current one
    pub fn go_forward(&mut self) -> Result<Step, WizardError> {
        let next = self.step.next().ok_or(WizardError::AtFinalStep)?;
        if !self.can_advance() {
            return Err(WizardError::StepIncomplete(self.step));
        }
        self.go_to(next)
    }

    /// Revisit any earlier step, or move one step ahead when the gate passes
    pub fn go_to(&mut self, target: Step) -> Result<Step, WizardError> {
        let allowed = target <= self.step
            || (Some(target) == self.step.next() && self.can_advance());
        if !allowed {
            return Err(WizardError::JumpRejected {
                from: self.step,
                to: target,
            });
        }
        if target != self.step {
            info!("Wizard jump {} -> {}", self.step, target);
        }
        self.step = target;
        Ok(target)
    }

    /// One step back; stays on the first step
    pub fn go_back(&mut self) -> Step {
        if let Some(prev) = self.step.prev() {
            info!("Wizard back {} -> {}", self.step, prev);
            self.step = prev;
        }
        self.step
    }

    /// Clear the registration and return to the first step
    pub fn restart(&mut self) {
        if self.draft.is_empty() {
            debug!("Wizard restarted with nothing entered");
        } else {
            info!("Wizard restarted from step {}", self.step);
        }
        *self = Self::new();
    }

    /// The complete registration, once every step has produced its entity
    pub fn registration(&self) -> Result<Registration, WizardError> {
        self.draft.complete().ok_or(WizardError::AggregateIncomplete)
    }
}
