//! Guided program selection: country, university, field, then level.
//!
//! Countries and universities come from directory lookups. The form never
//! performs I/O itself: it queues [`LookupRequest`]s that the app hands to the
//! supervisor, and accepts an outcome only when its ticket is the one the form
//! is currently waiting for.

use super::{FormPhase, StepForm};
use crate::directory::{LookupKind, LookupRequest, LookupTicket};
use crate::domain::catalog::common_fields;
use crate::domain::{GuidedProgram, StudyLevel};
use crate::error::LookupError;
use crate::i18n::MessageKey;

/// Rows per page in every list view
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubStep {
    Country,
    University,
    Field,
    Level,
}

impl SubStep {
    pub const ALL: [SubStep; 4] = [Self::Country, Self::University, Self::Field, Self::Level];

    pub fn next(&self) -> Option<SubStep> {
        match self {
            Self::Country => Some(Self::University),
            Self::University => Some(Self::Field),
            Self::Field => Some(Self::Level),
            Self::Level => None,
        }
    }

    pub fn prev(&self) -> Option<SubStep> {
        match self {
            Self::Country => None,
            Self::University => Some(Self::Country),
            Self::Field => Some(Self::University),
            Self::Level => Some(Self::Field),
        }
    }

    pub fn label_key(&self) -> MessageKey {
        match self {
            Self::Country => MessageKey::Country,
            Self::University => MessageKey::University,
            Self::Field => MessageKey::FieldOfStudy,
            Self::Level => MessageKey::Level,
        }
    }

    /// Whether free-text entry is offered
    pub fn allows_manual(&self) -> bool {
        !matches!(self, Self::Level)
    }
}

/// Searchable, paginated list of names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<String>,
    pub search: String,
    /// Zero-based page
    pub page: usize,
    /// Row within the current page
    pub cursor: usize,
}

impl Listing {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn filtered(&self) -> Vec<&str> {
        let needle = self.search.to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn page_items(&self) -> Vec<&str> {
        self.filtered()
            .into_iter()
            .skip(self.page * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn current(&self) -> Option<&str> {
        self.page_items().get(self.cursor).copied()
    }

    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.clamp();
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
        self.page = 0;
        self.cursor = 0;
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.page_count() - 1);
        self.cursor = 0;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
        self.cursor = 0;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let rows = self.page_items().len();
        if rows == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(rows - 1);
    }

    fn clamp(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
        self.cursor = self.cursor.min(self.page_items().len().saturating_sub(1));
    }
}

/// Progress of one directory lookup as seen by the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupState {
    #[default]
    Idle,
    Loading(LookupTicket),
    Ready,
    Failed(LookupError),
}

impl LookupState {
    pub fn error(&self) -> Option<&LookupError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuidedEvent {
    Search(String),
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    /// Pick the row under the cursor
    Select,
    /// Pick a value directly, e.g. the manual entry text
    Choose(String),
    ToggleManual,
    ManualText(String),
    LookupStarted(LookupTicket),
    LookupFinished {
        ticket: LookupTicket,
        result: Result<Vec<String>, LookupError>,
    },
    Retry,
    /// Clear a sub-step and everything after it, then return to it
    Modify(SubStep),
    Next,
    Prev,
}

#[derive(Debug, Clone)]
pub struct GuidedForm {
    pub sub_step: SubStep,
    pub country: Option<String>,
    pub university: Option<String>,
    pub field: Option<String>,
    pub level: Option<StudyLevel>,
    pub countries: Listing,
    pub universities: Listing,
    pub fields: Listing,
    pub levels: Listing,
    pub country_lookup: LookupState,
    pub university_lookup: LookupState,
    /// Free-text entry for the current sub-step, when open
    pub manual: Option<String>,
    pending: Vec<LookupRequest>,
    back_requested: bool,
    phase: FormPhase,
}

impl GuidedForm {
    /// New form; a seeded form starts at the country with prior values kept
    pub fn new(initial: Option<&GuidedProgram>) -> Self {
        let mut form = Self {
            sub_step: SubStep::Country,
            country: initial.map(|g| g.country.clone()),
            university: initial.map(|g| g.university.clone()),
            field: initial.map(|g| g.field.clone()),
            level: initial.map(|g| g.level),
            countries: Listing::default(),
            universities: Listing::default(),
            fields: Listing::new(common_fields()),
            levels: Listing::new(StudyLevel::ALL.iter().map(|l| l.label().to_string()).collect()),
            country_lookup: LookupState::Idle,
            university_lookup: LookupState::Idle,
            manual: None,
            pending: vec![LookupRequest::Countries],
            back_requested: false,
            phase: FormPhase::Editing,
        };
        if let Some(country) = form.country.clone() {
            form.pending.push(LookupRequest::Universities { country });
        }
        form
    }

    /// Requests queued since the last call
    pub fn take_lookup_requests(&mut self) -> Vec<LookupRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Whether `Prev` at the first sub-step asked to leave the step
    pub fn take_back_request(&mut self) -> bool {
        std::mem::take(&mut self.back_requested)
    }

    pub fn listing(&self, sub_step: SubStep) -> &Listing {
        match sub_step {
            SubStep::Country => &self.countries,
            SubStep::University => &self.universities,
            SubStep::Field => &self.fields,
            SubStep::Level => &self.levels,
        }
    }

    fn listing_mut(&mut self, sub_step: SubStep) -> &mut Listing {
        match sub_step {
            SubStep::Country => &mut self.countries,
            SubStep::University => &mut self.universities,
            SubStep::Field => &mut self.fields,
            SubStep::Level => &mut self.levels,
        }
    }

    /// Lookup feeding `sub_step`, if any
    pub fn lookup(&self, sub_step: SubStep) -> Option<&LookupState> {
        match sub_step {
            SubStep::Country => Some(&self.country_lookup),
            SubStep::University => Some(&self.university_lookup),
            SubStep::Field | SubStep::Level => None,
        }
    }

    fn lookup_mut(&mut self, kind: LookupKind) -> &mut LookupState {
        match kind {
            LookupKind::Countries => &mut self.country_lookup,
            LookupKind::Universities => &mut self.university_lookup,
        }
    }

    /// Selected value of `sub_step`, as text
    pub fn value(&self, sub_step: SubStep) -> Option<&str> {
        match sub_step {
            SubStep::Country => self.country.as_deref(),
            SubStep::University => self.university.as_deref(),
            SubStep::Field => self.field.as_deref(),
            SubStep::Level => self.level.as_ref().map(StudyLevel::label),
        }
    }

    fn is_filled(&self, sub_step: SubStep) -> bool {
        self.value(sub_step).is_some_and(|v| !v.trim().is_empty())
    }

    fn clear_from(&mut self, sub_step: SubStep) {
        if sub_step <= SubStep::Country {
            self.country = None;
        }
        if sub_step <= SubStep::University {
            self.university = None;
        }
        if sub_step <= SubStep::Field {
            self.field = None;
        }
        self.level = None;
    }

    /// Drop universities fetched for a previous country
    fn reset_universities(&mut self) {
        self.universities = Listing::default();
        self.university_lookup = LookupState::Idle;
    }

    /// Queue a university lookup unless one is loaded or in flight
    fn ensure_universities(&mut self) {
        if self.university_lookup != LookupState::Idle {
            return;
        }
        if let Some(country) = self.country.clone() {
            self.pending
                .retain(|r| r.kind() != LookupKind::Universities);
            self.pending.push(LookupRequest::Universities { country });
        }
    }

    fn request_for(&self, sub_step: SubStep) -> Option<LookupRequest> {
        match sub_step {
            SubStep::Country => Some(LookupRequest::Countries),
            SubStep::University => self
                .country
                .clone()
                .map(|country| LookupRequest::Universities { country }),
            SubStep::Field | SubStep::Level => None,
        }
    }

    fn enter(&mut self, sub_step: SubStep) {
        self.sub_step = sub_step;
        self.manual = None;
        if sub_step == SubStep::University {
            self.ensure_universities();
        }
        // a failed lookup leaves the user in manual entry
        if let Some(LookupState::Failed(_)) = self.lookup(sub_step) {
            self.manual = Some(self.value(sub_step).unwrap_or_default().to_string());
        }
    }

    fn choose(&mut self, value: String) {
        let value = value.trim().to_string();
        if value.is_empty() {
            return;
        }
        let step = self.sub_step;
        if self.value(step) == Some(value.as_str()) {
            tracing::debug!("Re-selected {:?} {:?}, keeping later choices", step, value);
        } else {
            match step {
                SubStep::Country => {
                    self.clear_from(SubStep::Country);
                    self.country = Some(value);
                    self.reset_universities();
                }
                SubStep::University => {
                    self.clear_from(SubStep::University);
                    self.university = Some(value);
                }
                SubStep::Field => {
                    self.clear_from(SubStep::Field);
                    self.field = Some(value);
                }
                SubStep::Level => match StudyLevel::ALL.iter().find(|l| l.label() == value) {
                    Some(level) => self.level = Some(*level),
                    None => return,
                },
            }
        }
        match step.next() {
            Some(next) => self.enter(next),
            None => self.manual = None,
        }
    }

    fn finish_lookup(&mut self, ticket: LookupTicket, result: Result<Vec<String>, LookupError>) {
        let state = self.lookup_mut(ticket.kind);
        if *state != LookupState::Loading(ticket) {
            tracing::debug!("Dropping stale lookup result {:?}", ticket);
            return;
        }
        let sub_step = match ticket.kind {
            LookupKind::Countries => SubStep::Country,
            LookupKind::Universities => SubStep::University,
        };
        match result {
            Ok(names) => {
                *state = LookupState::Ready;
                self.listing_mut(sub_step).set_items(names);
            }
            Err(e) => {
                *state = LookupState::Failed(e);
                if self.sub_step == sub_step && self.manual.is_none() {
                    self.manual = Some(self.value(sub_step).unwrap_or_default().to_string());
                }
            }
        }
    }

    fn retry(&mut self) {
        let retryable = self
            .lookup(self.sub_step)
            .and_then(LookupState::error)
            .is_some_and(LookupError::is_retryable);
        if !retryable {
            return;
        }
        if let Some(request) = self.request_for(self.sub_step) {
            self.manual = None;
            self.pending.push(request);
        }
    }

    fn modify(&mut self, sub_step: SubStep) {
        let country_cleared = sub_step == SubStep::Country && self.country.is_some();
        self.clear_from(sub_step);
        if country_cleared {
            self.reset_universities();
        }
        self.enter(sub_step);
    }
}

impl StepForm for GuidedForm {
    type Event = GuidedEvent;
    type Output = GuidedProgram;

    fn reduce(mut self, event: GuidedEvent) -> Self {
        if !matches!(
            event,
            GuidedEvent::LookupStarted(_) | GuidedEvent::LookupFinished { .. }
        ) {
            self.phase = FormPhase::Editing;
        }
        let step = self.sub_step;
        match event {
            GuidedEvent::Search(text) => self.listing_mut(step).set_search(text),
            GuidedEvent::MoveUp => self.listing_mut(step).move_cursor(-1),
            GuidedEvent::MoveDown => self.listing_mut(step).move_cursor(1),
            GuidedEvent::NextPage => self.listing_mut(step).next_page(),
            GuidedEvent::PrevPage => self.listing_mut(step).prev_page(),
            GuidedEvent::Select => {
                if let Some(value) = self.listing(step).current().map(str::to_string) {
                    self.choose(value);
                }
            }
            GuidedEvent::Choose(value) => self.choose(value),
            GuidedEvent::ToggleManual => {
                if step.allows_manual() {
                    self.manual = match self.manual {
                        Some(_) => None,
                        None => Some(self.value(step).unwrap_or_default().to_string()),
                    };
                }
            }
            GuidedEvent::ManualText(text) => {
                if self.manual.is_some() {
                    self.manual = Some(text);
                }
            }
            GuidedEvent::LookupStarted(ticket) => {
                *self.lookup_mut(ticket.kind) = LookupState::Loading(ticket);
            }
            GuidedEvent::LookupFinished { ticket, result } => self.finish_lookup(ticket, result),
            GuidedEvent::Retry => self.retry(),
            GuidedEvent::Modify(target) => {
                if target <= step || self.is_filled(target) {
                    self.modify(target);
                }
            }
            GuidedEvent::Next => {
                if self.is_filled(step) {
                    match step.next() {
                        Some(next) => self.enter(next),
                        None => {
                            tracing::debug!("Guided selection complete");
                            self.phase = FormPhase::Complete;
                        }
                    }
                }
            }
            GuidedEvent::Prev => match step.prev() {
                Some(prev) => self.enter(prev),
                None => self.back_requested = true,
            },
        }
        self
    }

    fn phase(&self) -> FormPhase {
        self.phase
    }

    fn entity(&self) -> Option<GuidedProgram> {
        Some(GuidedProgram {
            country: self.country.clone()?,
            university: self.university.clone()?,
            field: self.field.clone()?,
            level: self.level?,
        })
    }
}
