//! The option registry and the argument-vector parser.

use std::collections::HashMap;
use std::io;

use crate::convert::{
    DoubleConverter, FlagConverter, IntegerConverter, LongConverter, StringConverter,
    ValueConverter, VoidConverter,
};
use crate::error::OptionError;
use crate::locale::Locale;
use crate::option::{Opt, Slot, TypedSlot};
use crate::usage::{self, UsageSettings};

/// GNU-style command-line option parser.
///
/// Register typed options, then [`parse`](OptionParser::parse) an argument
/// vector and pull results back out through the [`Opt`] handles the
/// registration methods returned.
///
/// ```
/// use gnuopt::{Locale, OptionParser};
///
/// let mut parser = OptionParser::new();
/// let verbose = parser.add_boolean_option(Some('v'), "verbose", "enable verbose output");
/// let size = parser.add_integer_option(Some('s'), "size", "buffer size");
///
/// parser.parse_with_locale(["-v", "--size=100", "rest"], &Locale::EN_US)?;
///
/// assert_eq!(parser.value(&verbose), Some(true));
/// assert_eq!(parser.value(&size), Some(100));
/// assert_eq!(parser.remaining_args(), ["rest"]);
/// # Ok::<(), gnuopt::OptionError>(())
/// ```
///
/// Parsing is fail-fast: the first error aborts the scan, but values queued
/// for options earlier in the vector remain visible. Value queues are not
/// cleared between `parse` calls; unread values accumulate.
#[derive(Default)]
pub struct OptionParser {
    slots: Vec<Box<dyn Slot>>,
    lookup: HashMap<String, usize>,
    remaining: Vec<String>,
    usage: UsageSettings,
}

impl OptionParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn register<C>(
        &mut self,
        short: Option<char>,
        long: &str,
        wants_value: bool,
        converter: C,
        help: &str,
    ) -> Opt<C::Value>
    where
        C: ValueConverter + 'static,
        C::Value: 'static,
    {
        assert!(!long.is_empty(), "empty long form not allowed");
        let index = self.slots.len();
        self.slots
            .push(Box::new(TypedSlot::new(short, long, wants_value, converter, help)));
        if let Some(c) = short {
            self.lookup.insert(format!("-{c}"), index);
        }
        self.lookup.insert(format!("--{long}"), index);
        Opt::new(index)
    }

    /// Register a string option that requires a value.
    ///
    /// # Panics
    ///
    /// All registration methods panic if `long` is empty.
    pub fn add_string_option(
        &mut self,
        short: Option<char>,
        long: &str,
        help: &str,
    ) -> Opt<String> {
        self.register(short, long, true, StringConverter, help)
    }

    /// Register a string option that accepts a value (`--name=value`) but
    /// does not require one.
    pub fn add_optional_string_option(
        &mut self,
        short: Option<char>,
        long: &str,
        help: &str,
    ) -> Opt<String> {
        self.register(short, long, false, StringConverter, help)
    }

    /// Register an `i32` option that requires a value.
    pub fn add_integer_option(&mut self, short: Option<char>, long: &str, help: &str) -> Opt<i32> {
        self.register(short, long, true, IntegerConverter, help)
    }

    /// Register an `i32` option that accepts a value but does not require one.
    pub fn add_optional_integer_option(
        &mut self,
        short: Option<char>,
        long: &str,
        help: &str,
    ) -> Opt<i32> {
        self.register(short, long, false, IntegerConverter, help)
    }

    /// Register an `i64` option that requires a value.
    pub fn add_long_option(&mut self, short: Option<char>, long: &str, help: &str) -> Opt<i64> {
        self.register(short, long, true, LongConverter, help)
    }

    /// Register an `i64` option that accepts a value but does not require one.
    pub fn add_optional_long_option(
        &mut self,
        short: Option<char>,
        long: &str,
        help: &str,
    ) -> Opt<i64> {
        self.register(short, long, false, LongConverter, help)
    }

    /// Register an `f64` option that requires a value.
    pub fn add_double_option(&mut self, short: Option<char>, long: &str, help: &str) -> Opt<f64> {
        self.register(short, long, true, DoubleConverter, help)
    }

    /// Register an `f64` option that accepts a value but does not require one.
    pub fn add_optional_double_option(
        &mut self,
        short: Option<char>,
        long: &str,
        help: &str,
    ) -> Opt<f64> {
        self.register(short, long, false, DoubleConverter, help)
    }

    /// Register a boolean flag. Presence implies `true`; flags never take a
    /// value and may appear in clustered short-option tokens.
    pub fn add_boolean_option(&mut self, short: Option<char>, long: &str, help: &str) -> Opt<bool> {
        self.register(short, long, false, FlagConverter, help)
    }

    /// Register a void option: takes no value, never fails conversion.
    /// Useful for options like `--help` where only
    /// [`is_found`](OptionParser::is_found) matters.
    pub fn add_void_option(&mut self, short: Option<char>, long: &str, help: &str) -> Opt<()> {
        self.register(short, long, false, VoidConverter, help)
    }

    /// Register an option with a user-defined [`ValueConverter`]; the
    /// converter sees the locale the argument vector was parsed with.
    pub fn add_user_defined_option<C>(
        &mut self,
        short: Option<char>,
        long: &str,
        converter: C,
        help: &str,
    ) -> Opt<C::Value>
    where
        C: ValueConverter + 'static,
        C::Value: 'static,
    {
        self.register(short, long, true, converter, help)
    }

    /// Attach a raw fallback value to an option. The default is parsed
    /// lazily, at read time, and the option stops requiring an explicit
    /// value on the command line.
    ///
    /// `None` removes any usable fallback while still making the value
    /// optional; a value-requiring option given bare then fails with
    /// [`OptionError::IllegalOptionValue`].
    pub fn add_default_argument<T>(&mut self, opt: &Opt<T>, raw: Option<&str>) {
        self.slots[opt.index].set_default_argument(raw.map(str::to_string));
    }

    /// Parse an argument vector using the host system's locale.
    pub fn parse<I>(&mut self, args: I) -> Result<(), OptionError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.parse_with_locale(args, &Locale::system())
    }

    /// Parse an argument vector, converting locale-sensitive values with
    /// the given locale.
    pub fn parse_with_locale<I>(&mut self, args: I, locale: &Locale) -> Result<(), OptionError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let argv: Vec<String> = args.into_iter().map(Into::into).collect();
        for slot in &mut self.slots {
            slot.set_found(false);
        }

        let mut other_args = Vec::new();
        let mut position = 0;
        while position < argv.len() {
            let cur = &argv[position];
            // A bare "-" is a non-option argument (conventionally stdin).
            if !cur.starts_with('-') || cur == "-" {
                other_args.push(cur.clone());
                position += 1;
                continue;
            }
            if cur == "--" {
                position += 1;
                break;
            }
            let (key, mut value_arg) = if let Some(rest) = cur.strip_prefix("--") {
                match rest.split_once('=') {
                    Some((name, value)) => (format!("--{name}"), Some(value.to_string())),
                    None => (cur.clone(), None),
                }
            } else if cur.chars().count() > 2 {
                self.parse_cluster(cur, locale)?;
                position += 1;
                continue;
            } else {
                (cur.clone(), None)
            };
            let index = *self
                .lookup
                .get(&key)
                .ok_or(OptionError::UnknownOption { option: key })?;
            let slot = &mut self.slots[index];
            if slot.wants_value() && value_arg.is_none() {
                position += 1;
                if position < argv.len() {
                    value_arg = Some(argv[position].clone());
                }
            }
            slot.add_value(value_arg.as_deref(), locale)?;
            slot.set_found(true);
            position += 1;
        }
        // Everything after "--" is a non-option argument, verbatim.
        while position < argv.len() {
            other_args.push(argv[position].clone());
            position += 1;
        }
        self.remaining = other_args;
        Ok(())
    }

    /// Clustered short options (`-abc`): every character must resolve to a
    /// registered option that takes no value.
    fn parse_cluster(&mut self, token: &str, locale: &Locale) -> Result<(), OptionError> {
        for c in token.chars().skip(1) {
            let index = match self.lookup.get(&format!("-{c}")) {
                Some(index) => *index,
                None => {
                    return Err(OptionError::UnknownSuboption {
                        option: token.to_string(),
                        suboption: c,
                    })
                }
            };
            let slot = &mut self.slots[index];
            if slot.wants_value() {
                return Err(OptionError::NotFlag {
                    option: token.to_string(),
                    suboption: c,
                });
            }
            slot.add_value(None, locale)?;
            slot.set_found(true);
        }
        Ok(())
    }

    /// Pop the oldest value parsed for `opt`, or `None` if no value was
    /// parsed and no usable default argument exists.
    ///
    /// Conversion failures of a default argument are swallowed; this method
    /// never errors.
    pub fn value<T: 'static>(&mut self, opt: &Opt<T>) -> Option<T> {
        self.slots[opt.index]
            .pop_value()
            .and_then(|boxed| boxed.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Like [`value`](OptionParser::value), falling back to `default`.
    pub fn value_or<T: 'static>(&mut self, opt: &Opt<T>, default: T) -> T {
        self.value(opt).unwrap_or(default)
    }

    /// Drain all values parsed for `opt`, in order of occurrence. Never
    /// consults the option's default argument.
    pub fn values<T: 'static>(&mut self, opt: &Opt<T>) -> Vec<T> {
        self.slots[opt.index]
            .take_values()
            .into_iter()
            .filter_map(|boxed| boxed.downcast().ok())
            .map(|boxed| *boxed)
            .collect()
    }

    /// Whether `opt` appeared literally in the most recent parse,
    /// independent of any default-argument fallback.
    pub fn is_found<T>(&self, opt: &Opt<T>) -> bool {
        self.slots[opt.index].found()
    }

    /// The non-option arguments from the last successful parse, in their
    /// original order.
    pub fn remaining_args(&self) -> &[String] {
        &self.remaining
    }

    /// Set the text printed before the option lines in usage output.
    pub fn set_usage_preamble(&mut self, preamble: &str) {
        self.usage.preamble = preamble.to_string();
    }

    /// Set the text printed after the option lines in usage output.
    pub fn set_usage_postscript(&mut self, postscript: &str) {
        self.usage.postscript = postscript.to_string();
    }

    /// Set the indent prepended to every option line in usage output.
    pub fn set_option_indent(&mut self, indent: &str) {
        self.usage.indent = indent.to_string();
    }

    /// Render the usage text: one line per registered option, in
    /// registration order.
    pub fn usage(&self) -> String {
        usage::render(&self.slots, &self.usage)
    }

    /// Write the usage text to the given stream.
    pub fn print_usage(&self, out: &mut dyn io::Write) -> io::Result<()> {
        out.write_all(self.usage().as_bytes())
    }

    /// Write the usage text to standard error.
    pub fn print_usage_stderr(&self) {
        eprint!("{}", self.usage());
    }
}
