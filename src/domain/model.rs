//! Registration entities

use super::pricing::price_per_person;
use serde::{Deserialize, Serialize};

/// Applicant data collected by the personal-info step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Country code from the calling-code table (e.g. "CM")
    pub country: String,
    pub first_name: String,
    pub last_name: String,
    /// ISO `YYYY-MM-DD`
    pub birth_date: String,
    pub birth_place: String,
    pub phone: String,
    pub email: String,
    pub parent_name: String,
    pub parent_contact: String,
}

impl Student {
    /// Empty draft with the given country preselected
    pub fn with_country(country: &str) -> Self {
        Self {
            country: country.to_string(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Entry of the fixed program catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub city: String,
    pub country: String,
    pub university: String,
    pub field: String,
    pub tuition_fee: u32,
}

/// Degree level offered by the guided selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyLevel {
    Licence,
    Master,
    Doctorat,
}

impl StudyLevel {
    pub const ALL: [StudyLevel; 3] = [Self::Licence, Self::Master, Self::Doctorat];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Licence => "Licence",
            Self::Master => "Master",
            Self::Doctorat => "Doctorat",
        }
    }
}

/// Program built through the guided four-part selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidedProgram {
    pub country: String,
    pub university: String,
    pub field: String,
    pub level: StudyLevel,
}

/// Outcome of the program step, whichever selector produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgramSelection {
    Catalog(Program),
    Guided(GuidedProgram),
}

impl ProgramSelection {
    pub fn university(&self) -> &str {
        match self {
            Self::Catalog(p) => &p.university,
            Self::Guided(g) => &g.university,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::Catalog(p) => &p.field,
            Self::Guided(g) => &g.field,
        }
    }

    pub fn country(&self) -> &str {
        match self {
            Self::Catalog(p) => &p.country,
            Self::Guided(g) => &g.country,
        }
    }

    /// City, only known for catalog entries
    pub fn city(&self) -> Option<&str> {
        match self {
            Self::Catalog(p) => Some(&p.city),
            Self::Guided(_) => None,
        }
    }

    pub fn level(&self) -> Option<StudyLevel> {
        match self {
            Self::Catalog(_) => None,
            Self::Guided(g) => Some(g.level),
        }
    }

    /// Yearly tuition, zero when the program came from free-text entry
    pub fn tuition_fee(&self) -> u32 {
        match self {
            Self::Catalog(p) => p.tuition_fee,
            Self::Guided(_) => 0,
        }
    }
}

/// Entry of the fixed accommodation catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Monthly price for the whole unit
    pub base_price: u32,
    pub max_roommates: u8,
}

/// Accommodation picked together with the number of people sharing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationChoice {
    pub accommodation: Accommodation,
    pub roommate_count: u8,
}

impl AccommodationChoice {
    pub fn price_per_person(&self) -> u32 {
        price_per_person(self.accommodation.base_price, self.roommate_count)
    }
}

/// Optional service listed on the exported registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalService {
    pub id: String,
    pub label: String,
    pub price: u32,
}

/// In-progress aggregate owned by the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub student: Option<Student>,
    pub program: Option<ProgramSelection>,
    pub accommodation: Option<AccommodationChoice>,
}

impl RegistrationDraft {
    pub fn is_empty(&self) -> bool {
        self.student.is_none() && self.program.is_none() && self.accommodation.is_none()
    }

    /// Build the full registration once every part is present
    pub fn complete(&self) -> Option<Registration> {
        let student = self.student.clone()?;
        let program = self.program.clone()?;
        let choice = self.accommodation.clone()?;
        Some(Registration {
            student,
            program,
            roommate_count: choice.roommate_count,
            accommodation: choice.accommodation,
        })
    }
}

/// Completed registration handed to the summary and the exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub student: Student,
    pub program: ProgramSelection,
    pub accommodation: Accommodation,
    pub roommate_count: u8,
}

impl Registration {
    pub fn price_per_person(&self) -> u32 {
        price_per_person(self.accommodation.base_price, self.roommate_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_flat() -> AccommodationChoice {
        AccommodationChoice {
            accommodation: Accommodation {
                id: "3".into(),
                kind: "Shared Apartment".into(),
                base_price: 800,
                max_roommates: 4,
            },
            roommate_count: 4,
        }
    }

    #[test]
    fn test_draft_completes_only_with_every_part() {
        let mut draft = RegistrationDraft {
            student: Some(Student::with_country("FR")),
            ..Default::default()
        };
        assert!(draft.complete().is_none());

        draft.program = Some(ProgramSelection::Guided(GuidedProgram {
            country: "France".into(),
            university: "Université de Lille".into(),
            field: "Law".into(),
            level: StudyLevel::Master,
        }));
        assert!(draft.complete().is_none());

        draft.accommodation = Some(shared_flat());
        let registration = draft.complete().unwrap();
        assert_eq!(registration.roommate_count, 4);
        assert_eq!(registration.price_per_person(), 200);
    }

    #[test]
    fn test_guided_program_has_no_tuition_or_city() {
        let program = ProgramSelection::Guided(GuidedProgram {
            country: "Canada".into(),
            university: "McGill University".into(),
            field: "Physics".into(),
            level: StudyLevel::Doctorat,
        });
        assert_eq!(program.tuition_fee(), 0);
        assert!(program.city().is_none());
        assert_eq!(program.level(), Some(StudyLevel::Doctorat));
    }

    #[test]
    fn test_accommodation_serializes_kind_as_type() {
        let json = serde_json::to_value(shared_flat()).unwrap();
        assert_eq!(json["accommodation"]["type"], "Shared Apartment");
        assert_eq!(json["roommateCount"], 4);
    }
}
