//! Error types raised during option parsing and value conversion.

use thiserror::Error;

/// Errors that can occur while parsing an argument vector.
///
/// The parser fails fast: the first error aborts the scan, but options
/// processed earlier in the vector keep their queued values.
#[derive(Debug, Error)]
pub enum OptionError {
    /// A token did not match any registered spelling.
    #[error("unknown option '{option}'")]
    UnknownOption { option: String },

    /// A character inside a clustered short-option token is unregistered.
    #[error("illegal option: '{suboption}' in '{option}'")]
    UnknownSuboption { option: String, suboption: char },

    /// A character inside a clustered short-option token requires a value;
    /// clustering supports flags only.
    #[error("illegal option: '{option}', '{suboption}' requires a value")]
    NotFlag { option: String, suboption: char },

    /// A value failed conversion, was absent when required, or was present
    /// when forbidden.
    #[error(
        "illegal value '{}' for option --{option} (expects {expects})",
        .value.as_deref().unwrap_or("<none>")
    )]
    IllegalOptionValue {
        option: String,
        value: Option<String>,
        expects: String,
    },
}

/// Raised by a [`ValueConverter`](crate::convert::ValueConverter) when a raw
/// string cannot be converted. The parser decorates it with the offending
/// option's long spelling before surfacing it as
/// [`OptionError::IllegalOptionValue`].
#[derive(Debug, Error)]
#[error(
    "illegal value '{}' (expects {expects})",
    .value.as_deref().unwrap_or("<none>")
)]
pub struct ValueError {
    /// The raw value that failed conversion, or `None` when a required
    /// value was absent.
    pub value: Option<String>,
    /// What the converter expected, e.g. "an integer".
    pub expects: String,
}

impl ValueError {
    pub fn new(expects: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
            expects: expects.into(),
        }
    }

    pub(crate) fn for_option(self, long: &str) -> OptionError {
        OptionError::IllegalOptionValue {
            option: long.to_string(),
            value: self.value,
            expects: self.expects,
        }
    }
}
