//! Registered options: the typed handle handed to callers and the
//! type-erased slot the parser stores behind it.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

use crate::convert::ValueConverter;
use crate::error::OptionError;
use crate::locale::Locale;

/// Typed handle to a registered option.
///
/// Returned by the registration methods on
/// [`OptionParser`](crate::parser::OptionParser); pass it back to the same
/// parser to read parsed values. Handles are `Copy` and only meaningful
/// with the parser that issued them.
pub struct Opt<T> {
    pub(crate) index: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> Opt<T> {
    pub(crate) fn new(index: usize) -> Self {
        Opt {
            index,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for Opt<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Opt<T> {}

impl<T> fmt::Debug for Opt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Opt").field(&self.index).finish()
    }
}

/// The spellings and help text of a registered option.
pub(crate) struct OptInfo {
    pub(crate) short: Option<char>,
    pub(crate) long: String,
    pub(crate) help: String,
}

/// Object-safe view of an option slot, erasing the value type so slots of
/// different types share one registry. Typed values cross the boundary as
/// `Box<dyn Any>` and are downcast by the parser's accessors.
pub(crate) trait Slot {
    fn info(&self) -> &OptInfo;

    fn wants_value(&self) -> bool;

    fn found(&self) -> bool;

    fn set_found(&mut self, found: bool);

    /// Attach a default argument; the option stops requiring a value.
    fn set_default_argument(&mut self, raw: Option<String>);

    /// Convert and enqueue one occurrence's value. On conversion failure
    /// the parsed default argument is substituted if one exists; errors
    /// from that parse, or the original error otherwise, propagate.
    fn add_value(&mut self, raw: Option<&str>, locale: &Locale) -> Result<(), OptionError>;

    /// Pop the oldest queued value, falling back to the lazily parsed
    /// default argument. Conversion failures of the default are swallowed.
    fn pop_value(&mut self) -> Option<Box<dyn Any>>;

    /// Drain the whole queue in arrival order. Never consults the default
    /// argument.
    fn take_values(&mut self) -> Vec<Box<dyn Any>>;
}

pub(crate) struct TypedSlot<C: ValueConverter> {
    info: OptInfo,
    wants_value: bool,
    converter: C,
    default_argument: Option<String>,
    last_locale: Option<Locale>,
    values: VecDeque<C::Value>,
    found: bool,
}

impl<C: ValueConverter> TypedSlot<C> {
    pub(crate) fn new(
        short: Option<char>,
        long: &str,
        wants_value: bool,
        converter: C,
        help: &str,
    ) -> Self {
        TypedSlot {
            info: OptInfo {
                short,
                long: long.to_string(),
                help: help.to_string(),
            },
            wants_value,
            converter,
            default_argument: None,
            last_locale: None,
            values: VecDeque::new(),
            found: false,
        }
    }
}

impl<C> Slot for TypedSlot<C>
where
    C: ValueConverter,
    C::Value: 'static,
{
    fn info(&self) -> &OptInfo {
        &self.info
    }

    fn wants_value(&self) -> bool {
        self.wants_value
    }

    fn found(&self) -> bool {
        self.found
    }

    fn set_found(&mut self, found: bool) {
        self.found = found;
    }

    fn set_default_argument(&mut self, raw: Option<String>) {
        self.default_argument = raw;
        self.wants_value = false;
    }

    fn add_value(&mut self, raw: Option<&str>, locale: &Locale) -> Result<(), OptionError> {
        self.last_locale = Some(locale.clone());
        let value = match self.converter.convert(raw, locale) {
            Ok(value) => value,
            Err(err) => match self.default_argument.as_deref() {
                Some(default) => self
                    .converter
                    .convert(Some(default), locale)
                    .map_err(|e| e.for_option(&self.info.long))?,
                None => return Err(err.for_option(&self.info.long)),
            },
        };
        self.values.push_back(value);
        Ok(())
    }

    fn pop_value(&mut self) -> Option<Box<dyn Any>> {
        if let Some(value) = self.values.pop_front() {
            return Some(Box::new(value));
        }
        let default = self.default_argument.as_deref()?;
        let locale = self.last_locale.clone().unwrap_or_else(Locale::system);
        self.converter
            .convert(Some(default), &locale)
            .ok()
            .map(|value| Box::new(value) as Box<dyn Any>)
    }

    fn take_values(&mut self) -> Vec<Box<dyn Any>> {
        self.values
            .drain(..)
            .map(|value| Box::new(value) as Box<dyn Any>)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{DoubleConverter, IntegerConverter, StringConverter};

    fn pop<T: 'static>(slot: &mut dyn Slot) -> Option<T> {
        slot.pop_value().and_then(|v| v.downcast().ok()).map(|v| *v)
    }

    #[test]
    fn test_values_pop_in_arrival_order() {
        let mut slot = TypedSlot::new(Some('s'), "size", true, IntegerConverter, "enter size");
        slot.add_value(Some("1"), &Locale::EN_US).unwrap();
        slot.add_value(Some("2"), &Locale::EN_US).unwrap();
        assert_eq!(pop::<i32>(&mut slot), Some(1));
        assert_eq!(pop::<i32>(&mut slot), Some(2));
        assert_eq!(pop::<i32>(&mut slot), None);
    }

    #[test]
    fn test_default_argument_clears_wants_value() {
        let mut slot = TypedSlot::new(None, "name", true, StringConverter, "enter name");
        assert!(slot.wants_value());
        slot.set_default_argument(Some("fallback".to_string()));
        assert!(!slot.wants_value());
    }

    #[test]
    fn test_add_value_substitutes_default_on_failure() {
        let mut slot = TypedSlot::new(None, "size", true, IntegerConverter, "enter size");
        slot.set_default_argument(Some("7".to_string()));
        slot.add_value(Some("blah"), &Locale::EN_US).unwrap();
        assert_eq!(pop::<i32>(&mut slot), Some(7));
    }

    #[test]
    fn test_add_value_propagates_without_default() {
        let mut slot = TypedSlot::new(None, "size", true, IntegerConverter, "enter size");
        let err = slot.add_value(Some("blah"), &Locale::EN_US).unwrap_err();
        assert!(matches!(err, OptionError::IllegalOptionValue { .. }));
    }

    #[test]
    fn test_pop_value_swallows_default_failure() {
        let mut slot = TypedSlot::new(None, "size", true, IntegerConverter, "enter size");
        slot.set_default_argument(Some("blah".to_string()));
        assert_eq!(pop::<i32>(&mut slot), None);
    }

    #[test]
    fn test_pop_value_uses_last_parse_locale_for_default() {
        let mut slot = TypedSlot::new(None, "ratio", true, DoubleConverter, "enter ratio");
        slot.add_value(Some("1,5"), &Locale::DE_DE).unwrap();
        slot.set_default_argument(Some("3,5".to_string()));
        assert_eq!(pop::<f64>(&mut slot), Some(1.5));
        // Queue drained; the default parses with the last-seen locale.
        assert_eq!(pop::<f64>(&mut slot), Some(3.5));
    }

    #[test]
    fn test_take_values_never_touches_default() {
        let mut slot = TypedSlot::new(None, "name", true, StringConverter, "enter name");
        slot.set_default_argument(Some("fallback".to_string()));
        assert!(slot.take_values().is_empty());
    }
}
