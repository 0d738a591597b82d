//! Accommodation choice with roommate count

use super::{FormPhase, StepForm};
use crate::domain::pricing::price_per_person;
use crate::domain::{Accommodation, AccommodationChoice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccommodationEvent {
    /// Select the option at this index
    Choose(usize),
    MoveUp,
    MoveDown,
    SetRoommates(u8),
    Increment,
    Decrement,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccommodationForm {
    options: Vec<Accommodation>,
    pub cursor: usize,
    pub selected: Option<usize>,
    pub roommates: u8,
    phase: FormPhase,
}

impl AccommodationForm {
    pub fn new(options: &[Accommodation], initial: Option<&AccommodationChoice>) -> Self {
        let mut form = Self {
            options: options.to_vec(),
            cursor: 0,
            selected: None,
            roommates: 1,
            phase: FormPhase::Editing,
        };
        if let Some(choice) = initial {
            if let Some(idx) = options.iter().position(|o| o.id == choice.accommodation.id) {
                form.cursor = idx;
                form.selected = Some(idx);
                form.roommates = choice.roommate_count.clamp(1, form.max_roommates());
            }
        }
        form
    }

    pub fn options(&self) -> &[Accommodation] {
        &self.options
    }

    pub fn selected_option(&self) -> Option<&Accommodation> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Upper roommate bound of the selected option, at least 1
    pub fn max_roommates(&self) -> u8 {
        self.selected_option()
            .map(|o| o.max_roommates.max(1))
            .unwrap_or(1)
    }

    /// Live monthly price per person for the current selection
    pub fn price_per_person(&self) -> Option<u32> {
        self.selected_option()
            .map(|o| price_per_person(o.base_price, self.roommates))
    }

    fn choose(&mut self, idx: usize) {
        if idx < self.options.len() {
            self.cursor = idx;
            self.selected = Some(idx);
            self.roommates = 1;
        }
    }

    fn set_roommates(&mut self, count: u8) {
        if self.selected.is_some() {
            self.roommates = count.clamp(1, self.max_roommates());
        }
    }
}

impl StepForm for AccommodationForm {
    type Event = AccommodationEvent;
    type Output = AccommodationChoice;

    fn reduce(mut self, event: AccommodationEvent) -> Self {
        if event != AccommodationEvent::Submit {
            self.phase = FormPhase::Editing;
        }
        match event {
            AccommodationEvent::Choose(idx) => self.choose(idx),
            AccommodationEvent::MoveUp => self.choose(self.cursor.saturating_sub(1)),
            AccommodationEvent::MoveDown => {
                let last = self.options.len().saturating_sub(1);
                self.choose((self.cursor + 1).min(last));
            }
            AccommodationEvent::SetRoommates(n) => self.set_roommates(n),
            AccommodationEvent::Increment => self.set_roommates(self.roommates.saturating_add(1)),
            AccommodationEvent::Decrement => self.set_roommates(self.roommates.saturating_sub(1)),
            AccommodationEvent::Submit => {
                if self.selected.is_some() {
                    self.phase = FormPhase::Complete;
                }
            }
        }
        self
    }

    fn phase(&self) -> FormPhase {
        self.phase
    }

    fn entity(&self) -> Option<AccommodationChoice> {
        self.selected_option().map(|accommodation| AccommodationChoice {
            accommodation: accommodation.clone(),
            roommate_count: self.roommates,
        })
    }
}
