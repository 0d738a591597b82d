//! Static reference data: programs, accommodations, study fields, services

use super::model::{Accommodation, AdditionalService, Program};
use std::sync::LazyLock;

static PROGRAMS: LazyLock<Vec<Program>> = LazyLock::new(|| {
    [
        ("1", "Paris", "France", "Sorbonne University", "Business Administration", 9500),
        ("2", "Lyon", "France", "École Centrale de Lyon", "Engineering", 8500),
        ("3", "Bordeaux", "France", "University of Bordeaux", "Computer Science", 7500),
        ("4", "Toulouse", "France", "Toulouse Business School", "Business Administration", 8000),
        ("5", "Marseille", "France", "Aix-Marseille University", "Engineering", 7800),
    ]
    .into_iter()
    .map(|(id, city, country, university, field, tuition_fee)| Program {
        id: id.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        university: university.to_string(),
        field: field.to_string(),
        tuition_fee,
    })
    .collect()
});

static ACCOMMODATIONS: LazyLock<Vec<Accommodation>> = LazyLock::new(|| {
    [
        ("1", "Student Residence - Single Room", 600, 1),
        ("2", "Student Residence - Double Room", 450, 2),
        ("3", "Shared Apartment", 800, 4),
        ("4", "Studio Apartment", 900, 1),
    ]
    .into_iter()
    .map(|(id, kind, base_price, max_roommates)| Accommodation {
        id: id.to_string(),
        kind: kind.to_string(),
        base_price,
        max_roommates,
    })
    .collect()
});

static SERVICES: LazyLock<Vec<AdditionalService>> = LazyLock::new(|| {
    [
        ("airport", "Airport pickup", 60),
        ("insurance", "Health insurance", 350),
        ("visa", "Visa application support", 150),
    ]
    .into_iter()
    .map(|(id, label, price)| AdditionalService {
        id: id.to_string(),
        label: label.to_string(),
        price,
    })
    .collect()
});

/// Fields offered by the guided selection once a university is chosen
const COMMON_FIELDS: &[&str] = &[
    "Computer Science",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Medicine",
    "Law",
    "Economics",
    "Business Administration",
    "Psychology",
    "Sociology",
    "Political Science",
    "History",
    "Literature",
    "Engineering",
    "Architecture",
    "Education",
    "Philosophy",
    "Arts",
    "Communication",
];

pub fn programs() -> &'static [Program] {
    &PROGRAMS
}

pub fn accommodations() -> &'static [Accommodation] {
    &ACCOMMODATIONS
}

pub fn additional_services() -> &'static [AdditionalService] {
    &SERVICES
}

/// Common fields of study, sorted
pub fn common_fields() -> Vec<String> {
    let mut fields: Vec<String> = COMMON_FIELDS.iter().map(|f| f.to_string()).collect();
    fields.sort();
    fields
}

/// Distinct fields of `programs` in first-seen order
pub fn distinct_fields(programs: &[Program]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for program in programs {
        if !fields.contains(&program.field) {
            fields.push(program.field.clone());
        }
    }
    fields
}

/// Catalog filter: exact field match and case-insensitive substring search
/// over university, city, country and field.
pub fn matches_filter(program: &Program, field: Option<&str>, search: &str) -> bool {
    let matches_field = field.map_or(true, |f| program.field == f);
    let needle = search.to_lowercase();
    let matches_search = search.is_empty()
        || program.university.to_lowercase().contains(&needle)
        || program.city.to_lowercase().contains(&needle)
        || program.country.to_lowercase().contains(&needle)
        || program.field.to_lowercase().contains(&needle);
    matches_field && matches_search
}

pub fn filter_programs<'a>(
    programs: &'a [Program],
    field: Option<&str>,
    search: &str,
) -> Vec<&'a Program> {
    programs
        .iter()
        .filter(|p| matches_filter(p, field, search))
        .collect()
}
