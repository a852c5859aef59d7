//! Locale handling for numeric option values.
//!
//! Only the numeric converters are locale-sensitive, so a locale here is a
//! language/region tag pair plus the two separators that matter for parsing
//! numbers: the decimal separator and the digit-group separator.

use std::borrow::Cow;
use std::env;
use std::fmt;

/// Languages whose conventional decimal separator is a comma.
const COMMA_DECIMAL_LANGUAGES: &[&str] = &[
    "cs", "da", "de", "el", "es", "fi", "fr", "hu", "id", "it", "nb", "nl", "no", "pl", "pt", "ru",
    "sv", "tr",
];

/// A locale for value parsing: language and region tags with the numeric
/// formatting conventions derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    language: Cow<'static, str>,
    region: Cow<'static, str>,
    decimal_separator: char,
    group_separator: char,
}

impl Locale {
    /// English (United States): `1,000.5`
    pub const EN_US: Locale = Locale {
        language: Cow::Borrowed("en"),
        region: Cow::Borrowed("US"),
        decimal_separator: '.',
        group_separator: ',',
    };

    /// English (United Kingdom): `1,000.5`
    pub const EN_GB: Locale = Locale {
        language: Cow::Borrowed("en"),
        region: Cow::Borrowed("GB"),
        decimal_separator: '.',
        group_separator: ',',
    };

    /// German (Germany): `1.000,5`
    pub const DE_DE: Locale = Locale {
        language: Cow::Borrowed("de"),
        region: Cow::Borrowed("DE"),
        decimal_separator: ',',
        group_separator: '.',
    };

    /// French (France): `1\u{a0}000,5`
    pub const FR_FR: Locale = Locale {
        language: Cow::Borrowed("fr"),
        region: Cow::Borrowed("FR"),
        decimal_separator: ',',
        group_separator: '\u{a0}',
    };

    /// Build a locale from language and region tags.
    ///
    /// The language is lowercased, the region uppercased, and the numeric
    /// separators are derived from the language. The region may be empty.
    pub fn new(language: &str, region: &str) -> Self {
        let language = language.to_ascii_lowercase();
        let comma_decimal = COMMA_DECIMAL_LANGUAGES.contains(&language.as_str());
        let (decimal_separator, group_separator) = if comma_decimal {
            (',', '.')
        } else {
            ('.', ',')
        };
        Locale {
            language: Cow::Owned(language),
            region: Cow::Owned(region.to_ascii_uppercase()),
            decimal_separator,
            group_separator,
        }
    }

    /// Parse a POSIX locale tag such as `de_DE.UTF-8` or `en-GB`.
    ///
    /// Encoding (`.UTF-8`) and modifier (`@euro`) suffixes are ignored.
    /// Returns `None` for the `C` and `POSIX` locales and for empty tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.split('.').next().unwrap_or(tag);
        let tag = tag.split('@').next().unwrap_or(tag);
        if tag.is_empty() || tag == "C" || tag == "POSIX" {
            return None;
        }
        let (language, region) = tag
            .split_once(|c| c == '_' || c == '-')
            .unwrap_or((tag, ""));
        Some(Locale::new(language, region))
    }

    /// The host system's locale, read from the environment.
    ///
    /// Checks `LC_ALL`, `LC_NUMERIC` and `LANG` in that order; falls back to
    /// [`Locale::EN_US`] conventions when none of them names a usable locale.
    pub fn system() -> Self {
        for key in ["LC_ALL", "LC_NUMERIC", "LANG"] {
            if let Ok(value) = env::var(key) {
                if let Some(locale) = Locale::from_tag(&value) {
                    return locale;
                }
            }
        }
        Locale::EN_US
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Rewrite a raw numeric string into the form `str::parse` accepts:
    /// trimmed, group separators stripped, the decimal separator mapped
    /// to `.`.
    pub(crate) fn normalize_numeric(&self, raw: &str) -> String {
        raw.trim()
            .chars()
            .filter(|c| *c != self.group_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.region.is_empty() {
            write!(f, "{}", self.language)
        } else {
            write!(f, "{}_{}", self.language, self.region)
        }
    }
}
