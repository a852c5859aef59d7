//! Conversion of raw command-line strings into typed option values.

use crate::error::ValueError;
use crate::locale::Locale;

/// Converts the raw string attached to an option occurrence into the
/// option's value type.
///
/// `raw` is `None` when the option appeared without a value. Converters for
/// value-requiring types fail on `None`; the flag converter fails on
/// `Some(_)` instead, and the void converter never fails.
///
/// The trait is implemented for any
/// `Fn(Option<&str>, &Locale) -> Result<T, ValueError>`, so a user-defined
/// converter can be a plain function:
///
/// ```
/// use gnuopt::{Locale, ValueConverter, ValueError};
///
/// fn port(raw: Option<&str>, _locale: &Locale) -> Result<u16, ValueError> {
///     let raw = raw.ok_or_else(|| ValueError::new("a port number", None))?;
///     raw.parse().map_err(|_| ValueError::new("a port number", Some(raw)))
/// }
///
/// assert_eq!(port.convert(Some("8080"), &Locale::EN_US).unwrap(), 8080);
/// ```
pub trait ValueConverter {
    type Value;

    fn convert(&self, raw: Option<&str>, locale: &Locale) -> Result<Self::Value, ValueError>;
}

impl<T, F> ValueConverter for F
where
    F: Fn(Option<&str>, &Locale) -> Result<T, ValueError>,
{
    type Value = T;

    fn convert(&self, raw: Option<&str>, locale: &Locale) -> Result<T, ValueError> {
        self(raw, locale)
    }
}

fn require<'a>(raw: Option<&'a str>, expects: &str) -> Result<&'a str, ValueError> {
    raw.ok_or_else(|| ValueError::new(expects, None))
}

/// Converter for string options. Locale-independent; requires a value.
pub struct StringConverter;

impl ValueConverter for StringConverter {
    type Value = String;

    fn convert(&self, raw: Option<&str>, _locale: &Locale) -> Result<String, ValueError> {
        require(raw, "a string").map(str::to_string)
    }
}

/// Converter for `i32` options, honouring the locale's digit grouping.
pub struct IntegerConverter;

impl ValueConverter for IntegerConverter {
    type Value = i32;

    fn convert(&self, raw: Option<&str>, locale: &Locale) -> Result<i32, ValueError> {
        let raw = require(raw, "an integer")?;
        locale
            .normalize_numeric(raw)
            .parse()
            .map_err(|_| ValueError::new("an integer", Some(raw)))
    }
}

/// Converter for `i64` options, honouring the locale's digit grouping.
pub struct LongConverter;

impl ValueConverter for LongConverter {
    type Value = i64;

    fn convert(&self, raw: Option<&str>, locale: &Locale) -> Result<i64, ValueError> {
        let raw = require(raw, "a long integer")?;
        locale
            .normalize_numeric(raw)
            .parse()
            .map_err(|_| ValueError::new("a long integer", Some(raw)))
    }
}

/// Converter for `f64` options, honouring the locale's decimal separator
/// and digit grouping.
pub struct DoubleConverter;

impl ValueConverter for DoubleConverter {
    type Value = f64;

    fn convert(&self, raw: Option<&str>, locale: &Locale) -> Result<f64, ValueError> {
        let raw = require(raw, "a double")?;
        locale
            .normalize_numeric(raw)
            .parse()
            .map_err(|_| ValueError::new("a double", Some(raw)))
    }
}

/// Converter for boolean flags. Presence implies `true`; flags take no
/// explicit value, so an attached value is an error.
pub struct FlagConverter;

impl ValueConverter for FlagConverter {
    type Value = bool;

    fn convert(&self, raw: Option<&str>, _locale: &Locale) -> Result<bool, ValueError> {
        match raw {
            None => Ok(true),
            Some(value) => Err(ValueError::new("no value", Some(value))),
        }
    }
}

/// Converter for void options: always succeeds and discards any input.
pub struct VoidConverter;

impl ValueConverter for VoidConverter {
    type Value = ();

    fn convert(&self, _raw: Option<&str>, _locale: &Locale) -> Result<(), ValueError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_converter() {
        let value = StringConverter.convert(Some("foo"), &Locale::EN_US).unwrap();
        assert_eq!(value, "foo");
        assert!(StringConverter.convert(None, &Locale::EN_US).is_err());
    }

    #[test]
    fn test_integer_converter() {
        assert_eq!(
            IntegerConverter.convert(Some("100"), &Locale::EN_US).unwrap(),
            100
        );
        assert_eq!(
            IntegerConverter.convert(Some("-42"), &Locale::EN_US).unwrap(),
            -42
        );
        assert!(IntegerConverter.convert(Some("blah"), &Locale::EN_US).is_err());
        assert!(IntegerConverter.convert(None, &Locale::EN_US).is_err());
    }

    #[test]
    fn test_integer_converter_group_separators() {
        assert_eq!(
            IntegerConverter
                .convert(Some("1,000"), &Locale::EN_US)
                .unwrap(),
            1000
        );
        assert_eq!(
            IntegerConverter
                .convert(Some("1.000"), &Locale::DE_DE)
                .unwrap(),
            1000
        );
    }

    #[test]
    fn test_integer_converter_rejects_fractions() {
        // No silent truncation: "0.5" is not an integer.
        assert!(IntegerConverter.convert(Some("0.5"), &Locale::EN_US).is_err());
    }

    #[test]
    fn test_long_converter_beyond_i32() {
        let big = i64::from(i32::MAX) + 1;
        assert_eq!(
            LongConverter
                .convert(Some(&big.to_string()), &Locale::EN_US)
                .unwrap(),
            big
        );
    }

    #[test]
    fn test_double_converter_locales() {
        assert_eq!(
            DoubleConverter.convert(Some("0.2"), &Locale::EN_US).unwrap(),
            0.2
        );
        assert_eq!(
            DoubleConverter.convert(Some("0,2"), &Locale::DE_DE).unwrap(),
            0.2
        );
        assert!(DoubleConverter.convert(Some("zero"), &Locale::EN_US).is_err());
    }

    #[test]
    fn test_flag_converter() {
        assert!(FlagConverter.convert(None, &Locale::EN_US).unwrap());
        let err = FlagConverter.convert(Some("yes"), &Locale::EN_US).unwrap_err();
        assert_eq!(err.value.as_deref(), Some("yes"));
    }

    #[test]
    fn test_void_converter_discards_input() {
        VoidConverter.convert(None, &Locale::EN_US).unwrap();
        VoidConverter.convert(Some("ignored"), &Locale::EN_US).unwrap();
    }

    #[test]
    fn test_fn_converter() {
        fn upper(raw: Option<&str>, _locale: &Locale) -> Result<String, ValueError> {
            require(raw, "a word").map(str::to_uppercase)
        }
        assert_eq!(upper.convert(Some("abc"), &Locale::EN_US).unwrap(), "ABC");
    }
}
