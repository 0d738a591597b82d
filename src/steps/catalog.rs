//! Single-pick program selection over the fixed catalog

use super::{FormPhase, StepForm};
use crate::domain::catalog::{distinct_fields, filter_programs};
use crate::domain::Program;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    Search(String),
    /// Advance the field filter: all, then each distinct field, then all again
    CycleField,
    MoveUp,
    MoveDown,
    Select,
}

#[derive(Debug, Clone)]
pub struct CatalogForm {
    programs: Vec<Program>,
    fields: Vec<String>,
    pub search: String,
    pub field_filter: Option<String>,
    pub cursor: usize,
    selected: Option<Program>,
    phase: FormPhase,
}

impl CatalogForm {
    pub fn new(programs: &[Program], initial: Option<&Program>) -> Self {
        let cursor = initial
            .and_then(|p| programs.iter().position(|c| c.id == p.id))
            .unwrap_or(0);
        Self {
            fields: distinct_fields(programs),
            programs: programs.to_vec(),
            search: String::new(),
            field_filter: None,
            cursor,
            selected: None,
            phase: FormPhase::Editing,
        }
    }

    /// Programs passing the current filter, in catalog order
    pub fn visible(&self) -> Vec<&Program> {
        filter_programs(&self.programs, self.field_filter.as_deref(), &self.search)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    fn cycle_field(&mut self) {
        self.field_filter = match &self.field_filter {
            None => self.fields.first().cloned(),
            Some(current) => {
                let idx = self.fields.iter().position(|f| f == current);
                idx.and_then(|i| self.fields.get(i + 1)).cloned()
            }
        };
        self.cursor = 0;
    }
}

impl StepForm for CatalogForm {
    type Event = CatalogEvent;
    type Output = Program;

    fn reduce(mut self, event: CatalogEvent) -> Self {
        match event {
            CatalogEvent::Search(text) => {
                self.search = text;
                self.cursor = 0;
            }
            CatalogEvent::CycleField => self.cycle_field(),
            CatalogEvent::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            CatalogEvent::MoveDown => {
                let last = self.visible().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            CatalogEvent::Select => {
                let picked = self.visible().get(self.cursor).map(|p| (*p).clone());
                if let Some(program) = picked {
                    tracing::debug!("Selected program {}", program.id);
                    self.selected = Some(program);
                    self.phase = FormPhase::Complete;
                }
            }
        }
        self
    }

    fn phase(&self) -> FormPhase {
        self.phase
    }

    fn entity(&self) -> Option<Program> {
        self.selected.clone()
    }
}
