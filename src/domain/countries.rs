//! Country calling-code reference table

use crate::i18n::Language;

/// Country offered by the phone selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCode {
    pub code: &'static str,
    pub name_en: &'static str,
    pub name_fr: &'static str,
    pub calling_code: &'static str,
}

impl CountryCode {
    pub fn name(&self, lang: Language) -> &'static str {
        match lang {
            Language::En => self.name_en,
            Language::Fr => self.name_fr,
        }
    }
}

/// Country preselected on a fresh form
pub const DEFAULT_COUNTRY: &str = "CM";

pub const COUNTRIES: &[CountryCode] = &[
    CountryCode {
        code: "CM",
        name_en: "Cameroon",
        name_fr: "Cameroun",
        calling_code: "+237",
    },
    CountryCode {
        code: "FR",
        name_en: "France",
        name_fr: "France",
        calling_code: "+33",
    },
    CountryCode {
        code: "CA",
        name_en: "Canada",
        name_fr: "Canada",
        calling_code: "+1",
    },
    CountryCode {
        code: "BE",
        name_en: "Belgium",
        name_fr: "Belgique",
        calling_code: "+32",
    },
    CountryCode {
        code: "CH",
        name_en: "Switzerland",
        name_fr: "Suisse",
        calling_code: "+41",
    },
    CountryCode {
        code: "MA",
        name_en: "Morocco",
        name_fr: "Maroc",
        calling_code: "+212",
    },
    CountryCode {
        code: "SN",
        name_en: "Senegal",
        name_fr: "Sénégal",
        calling_code: "+221",
    },
];

pub fn find_country(code: &str) -> Option<&'static CountryCode> {
    COUNTRIES.iter().find(|c| c.code == code)
}

/// Calling code for `code`, empty when the country is unknown
pub fn calling_code(code: &str) -> &'static str {
    find_country(code).map(|c| c.calling_code).unwrap_or("")
}

/// Country code after `code` in the table, wrapping around
pub fn next_country(code: &str) -> &'static str {
    let idx = COUNTRIES.iter().position(|c| c.code == code).unwrap_or(0);
    COUNTRIES[(idx + 1) % COUNTRIES.len()].code
}

/// Country code before `code` in the table, wrapping around
pub fn prev_country(code: &str) -> &'static str {
    let idx = COUNTRIES.iter().position(|c| c.code == code).unwrap_or(0);
    if idx == 0 {
        COUNTRIES[COUNTRIES.len() - 1].code
    } else {
        COUNTRIES[idx - 1].code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_country_is_in_table() {
        assert_eq!(calling_code(DEFAULT_COUNTRY), "+237");
    }

    #[test]
    fn test_unknown_country_has_no_calling_code() {
        assert_eq!(calling_code("ZZ"), "");
        assert!(find_country("ZZ").is_none());
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(next_country("SN"), "CM");
        assert_eq!(prev_country("CM"), "SN");
        assert_eq!(next_country("CM"), "FR");
    }

    #[test]
    fn test_localized_names() {
        let sn = find_country("SN").unwrap();
        assert_eq!(sn.name(Language::En), "Senegal");
        assert_eq!(sn.name(Language::Fr), "Sénégal");
    }
}
