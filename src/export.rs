//! Registration document export

use crate::domain::countries::find_country;
use crate::domain::normalize::to_display;
use crate::domain::pricing::academic_year_total;
use crate::domain::{AdditionalService, Registration};
use crate::error::ExportError;
use crate::i18n::{t, Language, MessageKey};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// What a document is generated from
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub registration: &'a Registration,
    pub services: &'a [AdditionalService],
    pub language: Language,
}

/// Derived amounts shown on the summary and in documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub monthly_per_person: u32,
    pub services: u32,
    pub academic_year: u64,
}

impl Totals {
    pub fn of(registration: &Registration, services: &[AdditionalService]) -> Self {
        let monthly = registration.price_per_person();
        let services_total: u32 = services.iter().map(|s| s.price).sum();
        Self {
            monthly_per_person: monthly,
            services: services_total,
            academic_year: academic_year_total(
                registration.program.tuition_fee(),
                monthly,
                services_total,
            ),
        }
    }
}

pub fn format_amount(amount: impl Into<u64>) -> String {
    format!("€{}", amount.into())
}

/// Produces a document from a complete registration
pub trait DocumentExporter {
    /// File extension, without the dot
    fn extension(&self) -> &'static str;

    fn render(
        &self,
        request: &ExportRequest<'_>,
        reference: Uuid,
        date: NaiveDate,
    ) -> Result<String, ExportError>;

    /// Render and write `registration-<reference>.<ext>` into `dir`
    fn export(
        &self,
        request: &ExportRequest<'_>,
        dir: &Path,
        reference: Uuid,
        date: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        let content = self.render(request, reference, date)?;
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("registration-{}.{}", reference, self.extension()));
        fs::write(&path, content)?;
        tracing::info!("Exported registration to {}", path.display());
        Ok(path)
    }
}

/// Human-readable registration form
pub struct TextExporter;

impl DocumentExporter for TextExporter {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(
        &self,
        request: &ExportRequest<'_>,
        reference: Uuid,
        date: NaiveDate,
    ) -> Result<String, ExportError> {
        let lang = request.language;
        let reg = request.registration;
        let student = &reg.student;
        let totals = Totals::of(reg, request.services);
        let l = |key| t(lang, key);

        let mut out = String::new();
        let title = l(MessageKey::RegistrationForm);
        writeln!(out, "{}\n{}", title, "=".repeat(title.chars().count()))?;
        writeln!(out, "{}: {}", l(MessageKey::Reference), reference)?;
        writeln!(out, "{}: {}\n", l(MessageKey::Date), to_display(date))?;

        writeln!(out, "[{}]", l(MessageKey::StepPersonalInfo))?;
        let birth_date = NaiveDate::parse_from_str(&student.birth_date, "%Y-%m-%d")
            .map(to_display)
            .unwrap_or_else(|_| student.birth_date.clone());
        let country = find_country(&student.country)
            .map(|c| c.name(lang).to_string())
            .unwrap_or_else(|| student.country.clone());
        for (key, value) in [
            (MessageKey::FirstName, student.first_name.as_str()),
            (MessageKey::LastName, student.last_name.as_str()),
            (MessageKey::BirthDate, birth_date.as_str()),
            (MessageKey::BirthPlace, student.birth_place.as_str()),
            (MessageKey::Country, country.as_str()),
            (MessageKey::Phone, student.phone.as_str()),
            (MessageKey::Email, student.email.as_str()),
            (MessageKey::ParentName, student.parent_name.as_str()),
            (MessageKey::ParentContact, student.parent_contact.as_str()),
        ] {
            writeln!(out, "{}: {}", l(key), value)?;
        }

        let program = &reg.program;
        writeln!(out, "\n[{}]", l(MessageKey::StepProgram))?;
        writeln!(out, "{}: {}", l(MessageKey::University), program.university())?;
        if let Some(city) = program.city() {
            writeln!(out, "{}: {}", l(MessageKey::City), city)?;
        }
        writeln!(out, "{}: {}", l(MessageKey::Country), program.country())?;
        writeln!(out, "{}: {}", l(MessageKey::FieldOfStudy), program.field())?;
        if let Some(level) = program.level() {
            writeln!(out, "{}: {}", l(MessageKey::Level), level.label())?;
        }
        if program.tuition_fee() > 0 {
            writeln!(
                out,
                "{}: {}",
                l(MessageKey::Tuition),
                format_amount(program.tuition_fee())
            )?;
        }

        writeln!(out, "\n[{}]", l(MessageKey::StepAccommodation))?;
        writeln!(out, "{}: {}", l(MessageKey::AccommodationType), reg.accommodation.kind)?;
        writeln!(out, "{}: {}", l(MessageKey::Roommates), reg.roommate_count)?;
        writeln!(
            out,
            "{}: {} {}",
            l(MessageKey::BasePrice),
            format_amount(reg.accommodation.base_price),
            l(MessageKey::PerMonth)
        )?;
        writeln!(
            out,
            "{} {} {}",
            format_amount(totals.monthly_per_person),
            l(MessageKey::PricePerPerson),
            l(MessageKey::PerMonth)
        )?;

        writeln!(out, "\n[{}]", l(MessageKey::Services))?;
        if request.services.is_empty() {
            writeln!(out, "{}", l(MessageKey::NoServices))?;
        } else {
            for service in request.services {
                writeln!(out, "- {}: {}", service.label, format_amount(service.price))?;
            }
            writeln!(
                out,
                "{}: {}",
                l(MessageKey::ServicesTotal),
                format_amount(totals.services)
            )?;
        }

        writeln!(
            out,
            "\n{}: {}",
            l(MessageKey::TotalCost),
            format_amount(totals.academic_year)
        )?;
        Ok(out)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    reference: Uuid,
    date: NaiveDate,
    language: Language,
    registration: &'a Registration,
    services: &'a [AdditionalService],
    totals: Totals,
}

/// Machine-readable registration document
pub struct JsonExporter;

impl DocumentExporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(
        &self,
        request: &ExportRequest<'_>,
        reference: Uuid,
        date: NaiveDate,
    ) -> Result<String, ExportError> {
        let document = JsonDocument {
            reference,
            date,
            language: request.language,
            registration: request.registration,
            services: request.services,
            totals: Totals::of(request.registration, request.services),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
