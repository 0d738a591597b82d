//! Error types for the registration wizard

use crate::i18n::MessageKey;
use crate::wizard::Step;

/// Field-level validation failure, attached to the offending field
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("value is shorter than 2 characters")]
    TooShort,

    #[error("value contains characters other than letters, spaces, hyphens or apostrophes")]
    InvalidCharacters,

    #[error("value does not have the expected format")]
    InvalidFormat,

    #[error("applicant is younger than 15")]
    TooYoung,

    #[error("date could not be parsed")]
    InvalidDate,
}

impl FieldError {
    /// Key of the localized message for this error.
    ///
    /// `InvalidFormat` is shared by phone and email fields, so the caller
    /// passes whether the field holds an email address.
    pub fn message_key(&self, is_email: bool) -> MessageKey {
        match self {
            Self::TooShort => MessageKey::TooShort,
            Self::InvalidCharacters => MessageKey::InvalidName,
            Self::InvalidFormat if is_email => MessageKey::InvalidEmail,
            Self::InvalidFormat => MessageKey::InvalidPhone,
            Self::TooYoung => MessageKey::TooYoung,
            Self::InvalidDate => MessageKey::InvalidDate,
        }
    }
}

/// Directory lookup failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("directory lookup failed: {0}")]
    Failed(String),

    #[error("directory lookup timed out")]
    Timeout,

    #[error("directory returned no entries")]
    Empty,
}

impl LookupError {
    /// Whether the UI should offer a retry (as opposed to manual entry only)
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::Failed(_) => MessageKey::LookupFailed,
            Self::Timeout => MessageKey::LookupTimeout,
            Self::Empty => MessageKey::LookupEmpty,
        }
    }
}

/// Rejected wizard transition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("{entity} does not belong to step {step}")]
    UnexpectedEntity { step: Step, entity: &'static str },

    #[error("the summary is the final step")]
    AtFinalStep,

    #[error("step {0} is not complete yet")]
    StepIncomplete(Step),

    #[error("cannot jump from step {from} to step {to}")]
    JumpRejected { from: Step, to: Step },

    #[error("step number {0} is out of range")]
    OutOfRange(u8),

    #[error("the registration is not complete")]
    AggregateIncomplete,
}

/// Document export failure
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write registration document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize registration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to format registration: {0}")]
    Format(#[from] std::fmt::Error),
}
