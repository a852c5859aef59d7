//! Usage-text rendering for registered options.

use crate::option::{OptInfo, Slot};

/// Usage-text configuration held by the parser.
#[derive(Default)]
pub(crate) struct UsageSettings {
    pub(crate) preamble: String,
    pub(crate) postscript: String,
    pub(crate) indent: String,
}

/// Render one line per distinct option, in registration order. The
/// required/optional marker reflects whether the option currently wants a
/// value, so attaching a default argument turns the marker optional.
pub(crate) fn render(slots: &[Box<dyn Slot>], settings: &UsageSettings) -> String {
    let mut out = String::new();
    out.push_str(&settings.preamble);
    for slot in slots {
        out.push_str(&settings.indent);
        out.push_str(&option_line(slot.info(), slot.wants_value()));
        out.push('\n');
    }
    out.push_str(&settings.postscript);
    out
}

fn option_line(info: &OptInfo, wants_value: bool) -> String {
    let mut line = String::new();
    if let Some(short) = info.short {
        line.push_str(&format!("-{short}, "));
    }
    line.push_str(&format!("--{} === {}", info.long, info.help));
    line.push_str(if wants_value {
        " (required)"
    } else {
        " [optional]"
    });
    line
}

#[cfg(test)]
mod tests {
    use crate::locale::Locale;
    use crate::parser::OptionParser;
    use std::io::{Read, Seek, SeekFrom};

    fn sample_parser() -> OptionParser {
        let mut parser = OptionParser::new();
        parser.add_boolean_option(Some('v'), "verbose", "enable verbose");
        parser.add_integer_option(Some('s'), "size", "enter size");
        parser.add_string_option(None, "name", "enter name");
        parser
    }

    #[test]
    fn test_one_line_per_option_in_registration_order() {
        let parser = sample_parser();
        let usage = parser.usage();
        let lines: Vec<&str> = usage.lines().collect();
        assert_eq!(
            lines,
            vec![
                "-v, --verbose === enable verbose [optional]",
                "-s, --size === enter size (required)",
                "--name === enter name (required)",
            ]
        );
    }

    #[test]
    fn test_dual_spelled_option_rendered_once() {
        let parser = sample_parser();
        let usage = parser.usage();
        assert_eq!(usage.matches("--verbose").count(), 1);
    }

    #[test]
    fn test_preamble_postscript_indent() {
        let mut parser = OptionParser::new();
        parser.add_boolean_option(Some('v'), "verbose", "enable verbose");
        parser.set_usage_preamble("usage: demo [options]\n");
        parser.set_usage_postscript("report bugs upstream\n");
        parser.set_option_indent("  ");
        assert_eq!(
            parser.usage(),
            "usage: demo [options]\n  -v, --verbose === enable verbose [optional]\nreport bugs upstream\n"
        );
    }

    #[test]
    fn test_default_argument_flips_marker_to_optional() {
        let mut parser = OptionParser::new();
        let size = parser.add_integer_option(Some('s'), "size", "enter size");
        assert!(parser.usage().contains("(required)"));
        parser.add_default_argument(&size, Some("10"));
        assert!(parser.usage().contains("[optional]"));
    }

    #[test]
    fn test_usage_unaffected_by_parsing() {
        let mut parser = sample_parser();
        let before = parser.usage();
        parser
            .parse_with_locale(["-v", "--size=1"], &Locale::EN_US)
            .unwrap();
        assert_eq!(parser.usage(), before);
    }

    #[test]
    fn test_print_usage_writes_to_stream() {
        let parser = sample_parser();
        let mut file = tempfile::tempfile().unwrap();
        parser.print_usage(&mut file).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        let mut written = String::new();
        file.read_to_string(&mut written).unwrap();
        assert_eq!(written, parser.usage());
    }
}
