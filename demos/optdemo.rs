//! Demo program: registers a few typed options, parses the process
//! arguments and prints what it found.
//!
//! Try: `cargo run --example optdemo -- -v --size=1,000 -n demo -f 0.25 rest`

use anyhow::{Context, Result};
use gnuopt::{Locale, OptionParser};

fn main() -> Result<()> {
    let mut parser = OptionParser::new();
    parser.set_usage_preamble("usage: optdemo [options] [args...]\n");
    parser.set_option_indent("  ");

    let verbose = parser.add_boolean_option(Some('v'), "verbose", "enable verbose output");
    let size = parser.add_integer_option(Some('s'), "size", "buffer size");
    let name = parser.add_string_option(Some('n'), "name", "display name");
    let fraction = parser.add_double_option(Some('f'), "fraction", "sampling fraction");
    let help = parser.add_void_option(Some('h'), "help", "print this help text");
    parser.add_default_argument(&size, Some("512"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = parser.parse_with_locale(args, &Locale::system()) {
        parser.print_usage_stderr();
        return Err(err).context("failed to parse arguments");
    }

    if parser.is_found(&help) {
        parser.print_usage(&mut std::io::stdout())?;
        return Ok(());
    }

    println!("verbose:  {}", parser.value_or(&verbose, false));
    println!("size:     {}", parser.value_or(&size, 0));
    if let Some(name) = parser.value(&name) {
        println!("name:     {name}");
    }
    if let Some(fraction) = parser.value(&fraction) {
        println!("fraction: {fraction}");
    }
    println!("rest:     {:?}", parser.remaining_args());

    Ok(())
}
