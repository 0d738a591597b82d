//! Field-level validation rules for the personal-info step

use super::model::Student;
use crate::error::FieldError;
use crate::i18n::MessageKey;
use chrono::{Months, NaiveDate};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Minimum applicant age in years
pub const MIN_AGE_YEARS: u32 = 15;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]{1,4}[0-9]{6,}$").expect("phone pattern"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\x{C0}-\x{FF}\s'-]+$").expect("name pattern"));

/// Fields of the student form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudentField {
    FirstName,
    LastName,
    BirthDate,
    BirthPlace,
    Country,
    Phone,
    Email,
    ParentName,
    ParentContact,
}

impl StudentField {
    pub const ALL: [StudentField; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::BirthDate,
        Self::BirthPlace,
        Self::Country,
        Self::Phone,
        Self::Email,
        Self::ParentName,
        Self::ParentContact,
    ];

    pub fn label_key(&self) -> MessageKey {
        match self {
            Self::FirstName => MessageKey::FirstName,
            Self::LastName => MessageKey::LastName,
            Self::BirthDate => MessageKey::BirthDate,
            Self::BirthPlace => MessageKey::BirthPlace,
            Self::Country => MessageKey::Country,
            Self::Phone => MessageKey::Phone,
            Self::Email => MessageKey::Email,
            Self::ParentName => MessageKey::ParentName,
            Self::ParentContact => MessageKey::ParentContact,
        }
    }

    /// Current value of this field in `student`
    pub fn value<'a>(&self, student: &'a Student) -> &'a str {
        match self {
            Self::FirstName => &student.first_name,
            Self::LastName => &student.last_name,
            Self::BirthDate => &student.birth_date,
            Self::BirthPlace => &student.birth_place,
            Self::Country => &student.country,
            Self::Phone => &student.phone,
            Self::Email => &student.email,
            Self::ParentName => &student.parent_name,
            Self::ParentContact => &student.parent_contact,
        }
    }

    pub fn value_mut<'a>(&self, student: &'a mut Student) -> &'a mut String {
        match self {
            Self::FirstName => &mut student.first_name,
            Self::LastName => &mut student.last_name,
            Self::BirthDate => &mut student.birth_date,
            Self::BirthPlace => &mut student.birth_place,
            Self::Country => &mut student.country,
            Self::Phone => &mut student.phone,
            Self::Email => &mut student.email,
            Self::ParentName => &mut student.parent_name,
            Self::ParentContact => &mut student.parent_contact,
        }
    }
}

/// Latest birth date that still makes the applicant old enough on `today`
pub fn latest_allowed_birth_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(MIN_AGE_YEARS * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// Validate one raw field value.
///
/// Dates far in the past are accepted; only the minimum age is enforced.
pub fn validate(field: StudentField, raw: &str, today: NaiveDate) -> Result<(), FieldError> {
    match field {
        StudentField::Phone | StudentField::ParentContact => {
            if !PHONE_RE.is_match(raw) {
                return Err(FieldError::InvalidFormat);
            }
        }
        StudentField::Email => {
            if !EMAIL_RE.is_match(raw) {
                return Err(FieldError::InvalidFormat);
            }
        }
        StudentField::FirstName
        | StudentField::LastName
        | StudentField::BirthPlace
        | StudentField::ParentName => {
            if raw.chars().count() < 2 {
                return Err(FieldError::TooShort);
            }
            if !NAME_RE.is_match(raw) {
                return Err(FieldError::InvalidCharacters);
            }
        }
        StudentField::BirthDate => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| FieldError::InvalidDate)?;
            if date > latest_allowed_birth_date(today) {
                return Err(FieldError::TooYoung);
            }
        }
        StudentField::Country => {}
    }
    Ok(())
}

/// Validate every field except the country selector
pub fn validate_student(student: &Student, today: NaiveDate) -> BTreeMap<StudentField, FieldError> {
    StudentField::ALL
        .iter()
        .filter(|f| **f != StudentField::Country)
        .filter_map(|f| validate(*f, f.value(student), today).err().map(|e| (*f, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn valid_student() -> Student {
        Student {
            country: "FR".into(),
            first_name: "Amélie".into(),
            last_name: "Ndiaye-Kouam".into(),
            birth_date: "2004-05-12".into(),
            birth_place: "Douala".into(),
            phone: "+33612345678".into(),
            email: "amelie@example.org".into(),
            parent_name: "Jean d'Arc".into(),
            parent_contact: "+237699001122".into(),
        }
    }

    mod phone {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_calling_code_and_digits() {
            assert!(validate(StudentField::Phone, "+33612345678", today()).is_ok());
            assert!(validate(StudentField::ParentContact, "+1123456", today()).is_ok());
        }

        #[test]
        fn test_rejects_missing_plus() {
            assert_eq!(
                validate(StudentField::Phone, "33612345678", today()),
                Err(FieldError::InvalidFormat)
            );
        }

        #[test]
        fn test_rejects_too_few_digits() {
            assert_eq!(
                validate(StudentField::Phone, "+33123", today()),
                Err(FieldError::InvalidFormat)
            );
        }

        #[test]
        fn test_rejects_embedded_characters() {
            for raw in ["+33 612345678", "+33-612345678", "+33+612345678", ""] {
                assert_eq!(
                    validate(StudentField::Phone, raw, today()),
                    Err(FieldError::InvalidFormat),
                    "{raw:?}"
                );
            }
        }
    }

    mod email {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_simple_address() {
            assert!(validate(StudentField::Email, "a.b@uni.example.fr", today()).is_ok());
        }

        #[test]
        fn test_rejects_malformed_addresses() {
            for raw in ["plain", "a@b", "a b@c.de", "@c.de", "a@@c.de"] {
                assert_eq!(
                    validate(StudentField::Email, raw, today()),
                    Err(FieldError::InvalidFormat),
                    "{raw:?}"
                );
            }
        }
    }

    mod names {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_too_short_checked_first() {
            assert_eq!(
                validate(StudentField::FirstName, "1", today()),
                Err(FieldError::TooShort)
            );
            assert_eq!(
                validate(StudentField::LastName, "", today()),
                Err(FieldError::TooShort)
            );
        }

        #[test]
        fn test_accented_letters_and_punctuation_accepted() {
            for raw in ["Éloïse", "O'Neil", "Jean-Luc", "Saint Louis", "Ngaoundéré"] {
                assert!(validate(StudentField::BirthPlace, raw, today()).is_ok(), "{raw}");
            }
        }

        #[test]
        fn test_digits_and_symbols_rejected() {
            for raw in ["R2D2", "Anne_Marie", "Zoë!", "Łukasz"] {
                assert_eq!(
                    validate(StudentField::ParentName, raw, today()),
                    Err(FieldError::InvalidCharacters),
                    "{raw}"
                );
            }
        }
    }

    mod birth_date {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_sixteen_years_old_is_accepted() {
            assert!(validate(StudentField::BirthDate, "2010-10-16", today()).is_ok());
        }

        #[test]
        fn test_fourteen_years_old_is_too_young() {
            assert_eq!(
                validate(StudentField::BirthDate, "2012-10-16", today()),
                Err(FieldError::TooYoung)
            );
        }

        #[test]
        fn test_fifteenth_birthday_today_is_accepted() {
            assert!(validate(StudentField::BirthDate, "2011-10-16", today()).is_ok());
            assert_eq!(
                validate(StudentField::BirthDate, "2011-10-17", today()),
                Err(FieldError::TooYoung)
            );
        }

        #[test]
        fn test_far_past_is_accepted() {
            assert!(validate(StudentField::BirthDate, "1800-01-01", today()).is_ok());
        }

        #[test]
        fn test_unparseable_is_invalid_date() {
            for raw in ["", "16/10/2000", "2000-02-30"] {
                assert_eq!(
                    validate(StudentField::BirthDate, raw, today()),
                    Err(FieldError::InvalidDate),
                    "{raw:?}"
                );
            }
        }
    }

    #[test]
    fn test_country_is_always_valid() {
        assert!(validate(StudentField::Country, "", today()).is_ok());
    }

    #[test]
    fn test_validate_student_collects_every_error() {
        let student = Student {
            first_name: "A".into(),
            email: "nope".into(),
            ..valid_student()
        };
        let errors = validate_student(&student, today());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[&StudentField::FirstName], FieldError::TooShort);
        assert_eq!(errors[&StudentField::Email], FieldError::InvalidFormat);
    }

    #[test]
    fn test_validate_student_ignores_country() {
        let student = Student {
            country: String::new(),
            ..valid_student()
        };
        assert!(validate_student(&student, today()).is_empty());
    }
}
