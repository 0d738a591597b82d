//! UI-free registration domain: data model, reference data and field rules

pub mod catalog;
pub mod countries;
pub mod model;
pub mod normalize;
pub mod pricing;
pub mod validation;

pub use model::{
    Accommodation, AccommodationChoice, AdditionalService, GuidedProgram, Program,
    ProgramSelection, Registration, RegistrationDraft, Student, StudyLevel,
};
