//! gnuopt - GNU-style command-line option parsing with typed options.
//!
//! This library provides a largely GNU-compatible option parser: short
//! (`-v`) and long (`--verbose`) options, options with values (`-d 2`,
//! `--debug 2`, `--debug=2`), combined short flags (`-abc`), explicit
//! termination of option processing with `--`, locale-aware numeric value
//! conversion, lazily parsed default arguments, multi-occurrence value
//! collection, and usage-text generation.
//!
//! Register options on an [`OptionParser`], parse an argument vector, then
//! read results back through the typed [`Opt`] handles:
//!
//! ```
//! use gnuopt::{Locale, OptionParser};
//!
//! let mut parser = OptionParser::new();
//! let verbose = parser.add_boolean_option(Some('v'), "verbose", "enable verbose output");
//! let debug = parser.add_integer_option(Some('d'), "debug", "debug level");
//!
//! parser.parse_with_locale(["-v", "--debug=2", "input.txt"], &Locale::EN_US)?;
//!
//! assert!(parser.value_or(&verbose, false));
//! assert_eq!(parser.value(&debug), Some(2));
//! assert_eq!(parser.remaining_args(), ["input.txt"]);
//! # Ok::<(), gnuopt::OptionError>(())
//! ```

pub mod convert;
pub mod error;
pub mod locale;
pub mod option;
pub mod parser;
mod usage;

pub use convert::{
    DoubleConverter, FlagConverter, IntegerConverter, LongConverter, StringConverter,
    ValueConverter, VoidConverter,
};
pub use error::{OptionError, ValueError};
pub use locale::Locale;
pub use option::Opt;
pub use parser::OptionParser;
