//! Input normalizers: phone calling-code prefixing and free-text dates

use crate::error::FieldError;
use chrono::{Months, NaiveDate};

/// Rewrite the phone prefix after the country selector changed.
///
/// Only values that already carry an international prefix are touched.
pub fn on_country_change(phone: &str, old_code: &str, new_code: &str) -> String {
    if !phone.starts_with('+') {
        return phone.to_string();
    }
    if !old_code.is_empty() {
        if let Some(local) = phone.strip_prefix(old_code) {
            return format!("{new_code}{local}");
        }
    }
    new_code.to_string()
}

/// Normalize typed phone input so it carries `calling_code` exactly once
pub fn normalize_phone_input(raw: &str, calling_code: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let has_plus = raw.trim_start().starts_with('+');
    let cleaned = if has_plus {
        format!("+{digits}")
    } else {
        digits.clone()
    };

    if calling_code.is_empty() || cleaned.starts_with(calling_code) {
        return cleaned;
    }
    // erasing into the prefix keeps the prefix
    if has_plus && calling_code.starts_with(&cleaned) {
        return calling_code.to_string();
    }
    format!("{calling_code}{digits}")
}

/// Keystroke filter for phone fields that are not prefixed automatically
pub fn restrict_phone_chars(raw: &str) -> Option<String> {
    raw.chars()
        .all(|c| c.is_ascii_digit() || c == '+')
        .then(|| raw.to_string())
}

/// Progressive `DD/MM/YYYY` formatting of whatever digits were typed
pub fn auto_format_date(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).take(8).collect();
    let groups = [(0usize, 2usize), (2, 4), (4, 8)];
    groups
        .iter()
        .filter(|(start, _)| *start < digits.len())
        .map(|(start, end)| digits[*start..(*end).min(digits.len())].iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Day { exact: bool },
    Month { exact: bool },
    Year,
    Sep(char),
}

/// Accepted input patterns, tried in order
const DATE_PATTERNS: &[(&str, &[Token])] = {
    use Token::*;
    &[
        ("DDMMYYYY", &[Day { exact: true }, Month { exact: true }, Year]),
        ("DD/MM/YYYY", &[Day { exact: true }, Sep('/'), Month { exact: true }, Sep('/'), Year]),
        ("D/M/YYYY", &[Day { exact: false }, Sep('/'), Month { exact: false }, Sep('/'), Year]),
        ("DD-MM-YYYY", &[Day { exact: true }, Sep('-'), Month { exact: true }, Sep('-'), Year]),
        ("D-M-YYYY", &[Day { exact: false }, Sep('-'), Month { exact: false }, Sep('-'), Year]),
        ("DD.MM.YYYY", &[Day { exact: true }, Sep('.'), Month { exact: true }, Sep('.'), Year]),
        ("D.M.YYYY", &[Day { exact: false }, Sep('.'), Month { exact: false }, Sep('.'), Year]),
        ("YYYY-MM-DD", &[Year, Sep('-'), Month { exact: true }, Sep('-'), Day { exact: true }]),
    ]
};

/// Read a run of 1..=max digits (exactly `max` when `exact`), returning the
/// value and the rest of the input
fn take_number(input: &str, max: usize, exact: bool) -> Option<(u32, &str)> {
    let len = input.chars().take_while(|c| c.is_ascii_digit()).take(max).count();
    if len == 0 || (exact && len != max) {
        return None;
    }
    let value = input[..len].parse().ok()?;
    Some((value, &input[len..]))
}

fn parse_with(text: &str, tokens: &[Token]) -> Option<NaiveDate> {
    let (mut day, mut month, mut year) = (0, 0, 0);
    let mut rest = text;
    for token in tokens {
        match token {
            Token::Day { exact } => (day, rest) = take_number(rest, 2, *exact)?,
            Token::Month { exact } => (month, rest) = take_number(rest, 2, *exact)?,
            Token::Year => {
                let (y, r) = take_number(rest, 4, true)?;
                year = y as i32;
                rest = r;
            }
            Token::Sep(sep) => rest = rest.strip_prefix(*sep)?,
        }
    }
    if !rest.is_empty() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Strictly parse `text` against the accepted patterns; first match wins
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERNS
        .iter()
        .find_map(|(_, tokens)| parse_with(text, tokens))
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn to_display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Free-text birth date entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInput {
    /// Formatted text as shown to the user
    pub text: String,
    /// Parsed value, `None` while the text does not form a date
    pub canonical: Option<NaiveDate>,
    pub error: Option<FieldError>,
}

impl DateInput {
    pub fn from_iso(iso: &str) -> Self {
        match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            Ok(date) => Self::from_date(date),
            Err(_) => Self::default(),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            text: to_display(date),
            canonical: Some(date),
            error: None,
        }
    }

    /// Apply a raw text change
    pub fn on_text(&mut self, raw: &str) {
        self.text = auto_format_date(raw);
        match parse_date(&self.text) {
            Some(date) => {
                self.canonical = Some(date);
                self.error = None;
            }
            None => {
                self.canonical = None;
                // no error on the first keystroke
                self.error = (raw.chars().count() >= 2).then_some(FieldError::InvalidDate);
            }
        }
    }

    /// Set the date from the picker, bypassing text parsing
    pub fn on_pick(&mut self, date: NaiveDate) {
        *self = Self::from_date(date);
    }

    pub fn iso(&self) -> String {
        self.canonical.map(to_iso).unwrap_or_default()
    }
}

/// Calendar picker bounded to the last hundred years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePicker {
    pub min: NaiveDate,
    pub max: NaiveDate,
    pub selected: NaiveDate,
}

impl DatePicker {
    pub const RANGE_YEARS: u32 = 100;

    pub fn new(today: NaiveDate, initial: Option<NaiveDate>) -> Self {
        let min = today
            .checked_sub_months(Months::new(Self::RANGE_YEARS * 12))
            .unwrap_or(NaiveDate::MIN);
        let mut picker = Self {
            min,
            max: today,
            selected: today,
        };
        picker.selected = picker.clamp(initial.unwrap_or(today));
        picker
    }

    fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.max)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.min..=self.max).contains(&date)
    }

    pub fn shift_days(&mut self, days: i64) {
        let target = self
            .selected
            .checked_add_signed(chrono::Duration::days(days))
            .unwrap_or(if days < 0 { self.min } else { self.max });
        self.selected = self.clamp(target);
    }

    pub fn shift_months(&mut self, months: i32) {
        let delta = Months::new(months.unsigned_abs());
        let target = if months < 0 {
            self.selected.checked_sub_months(delta)
        } else {
            self.selected.checked_add_months(delta)
        };
        self.selected = self.clamp(target.unwrap_or(if months < 0 { self.min } else { self.max }));
    }

    pub fn shift_years(&mut self, years: i32) {
        self.shift_months(years.saturating_mul(12));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod phone {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_local_digits_get_prefixed() {
            assert_eq!(normalize_phone_input("612345678", "+33"), "+33612345678");
        }

        #[test]
        fn test_normalization_is_idempotent() {
            for raw in ["612345678", "+33612345678", "06 12-34", "+"] {
                let once = normalize_phone_input(raw, "+33");
                assert_eq!(normalize_phone_input(&once, "+33"), once, "{raw:?}");
                assert!(once.starts_with("+33"));
                assert!(!once[3..].starts_with("+33"));
            }
        }

        #[test]
        fn test_prefix_not_typed_twice() {
            assert_eq!(normalize_phone_input("+3361", "+33"), "+3361");
        }

        #[test]
        fn test_erasing_into_prefix_keeps_prefix() {
            assert_eq!(normalize_phone_input("+23", "+237"), "+237");
            assert_eq!(normalize_phone_input("", "+237"), "+237");
        }

        #[test]
        fn test_strips_formatting_characters() {
            assert_eq!(normalize_phone_input("6 12.34-56 78", "+33"), "+33612345678");
        }

        #[test]
        fn test_country_switch_replaces_prefix() {
            assert_eq!(on_country_change("+33612345678", "+33", "+1"), "+1612345678");
        }

        #[test]
        fn test_country_switch_keeps_local_number() {
            assert_eq!(on_country_change("612345678", "+33", "+1"), "612345678");
        }

        #[test]
        fn test_country_switch_with_unknown_prefix() {
            assert_eq!(on_country_change("+49301234", "+33", "+237"), "+237");
        }

        #[test]
        fn test_restrict_phone_chars() {
            assert_eq!(restrict_phone_chars("+2376").as_deref(), Some("+2376"));
            assert!(restrict_phone_chars("+237a").is_none());
        }
    }

    mod dates {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_auto_format_progressively() {
            assert_eq!(auto_format_date("3"), "3");
            assert_eq!(auto_format_date("311"), "31/1");
            assert_eq!(auto_format_date("31122"), "31/12/2");
            assert_eq!(auto_format_date("31122000"), "31/12/2000");
            assert_eq!(auto_format_date("31/12/2000"), "31/12/2000");
            assert_eq!(auto_format_date("3112200099"), "31/12/2000");
        }

        #[test]
        fn test_parse_every_accepted_pattern() {
            let expected = date(2000, 12, 31);
            for text in [
                "31122000",
                "31/12/2000",
                "31-12-2000",
                "31.12.2000",
                "2000-12-31",
            ] {
                assert_eq!(parse_date(text), Some(expected), "{text}");
            }
            assert_eq!(parse_date("1/2/2003"), Some(date(2003, 2, 1)));
            assert_eq!(parse_date("1.2.2003"), Some(date(2003, 2, 1)));
        }

        #[test]
        fn test_parse_is_strict() {
            for text in ["31/12/00", "31/12/20001", "31/13/2000", "30/02/2000", "31 12 2000", ""] {
                assert_eq!(parse_date(text), None, "{text:?}");
            }
        }

        #[test]
        fn test_date_input_emits_iso_on_success() {
            let mut input = DateInput::default();
            input.on_text("31122000");
            assert_eq!(input.text, "31/12/2000");
            assert_eq!(input.iso(), "2000-12-31");
            assert!(input.error.is_none());
        }

        #[test]
        fn test_date_input_parses_only_the_formatted_text() {
            let mut input = DateInput::default();
            input.on_text("2000-12-31");
            assert_eq!(input.text, "20/00/1231");
            assert_eq!(input.canonical, None);
            assert_eq!(input.error, Some(FieldError::InvalidDate));

            input.on_text("31.12.2000");
            assert_eq!(input.text, "31/12/2000");
            assert_eq!(input.iso(), "2000-12-31");
        }

        #[test]
        fn test_date_input_error_only_after_two_chars() {
            let mut input = DateInput::default();
            input.on_text("3");
            assert!(input.error.is_none());
            assert!(input.canonical.is_none());

            input.on_text("31");
            assert_eq!(input.error, Some(FieldError::InvalidDate));
            assert_eq!(input.iso(), "");
        }

        #[test]
        fn test_date_input_clears_value_on_failure() {
            let mut input = DateInput::from_iso("2000-12-31");
            input.on_text("31/12/200");
            assert!(input.canonical.is_none());
            assert_eq!(input.error, Some(FieldError::InvalidDate));
        }

        #[test]
        fn test_pick_bypasses_text() {
            let mut input = DateInput::default();
            input.on_text("99");
            input.on_pick(date(2001, 3, 4));
            assert_eq!(input.text, "04/03/2001");
            assert!(input.error.is_none());
        }
    }

    mod picker {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_bounds_are_last_hundred_years() {
            let picker = DatePicker::new(date(2026, 10, 16), None);
            assert_eq!(picker.min, date(1926, 10, 16));
            assert_eq!(picker.max, date(2026, 10, 16));
            assert_eq!(picker.selected, picker.max);
        }

        #[test]
        fn test_initial_value_is_clamped() {
            let picker = DatePicker::new(date(2026, 10, 16), Some(date(1800, 1, 1)));
            assert_eq!(picker.selected, date(1926, 10, 16));
        }

        #[test]
        fn test_cannot_step_past_today() {
            let mut picker = DatePicker::new(date(2026, 10, 16), None);
            picker.shift_days(1);
            assert_eq!(picker.selected, date(2026, 10, 16));
            picker.shift_years(1);
            assert_eq!(picker.selected, date(2026, 10, 16));
        }

        #[test]
        fn test_stepping_back() {
            let mut picker = DatePicker::new(date(2026, 10, 16), None);
            picker.shift_years(-20);
            picker.shift_months(-1);
            picker.shift_days(-15);
            assert_eq!(picker.selected, date(2006, 9, 1));
            assert!(picker.contains(picker.selected));
        }

        #[test]
        fn test_cannot_step_before_min() {
            let mut picker = DatePicker::new(date(2026, 10, 16), None);
            picker.shift_years(-150);
            assert_eq!(picker.selected, picker.min);
        }
    }
}
