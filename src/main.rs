use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use goast::renderer::{LabelStyle, OutputFormat, RenderContext};
use std::fs;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("goast")
        .about("Print the syntax tree of a Go source file, one node per line")
        .arg(
            Arg::new("input")
                .help("Go source file, or - for stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("full-labels")
                .long("full-labels")
                .help("Give every node kind its own label instead of `Unknown ...`")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Spaces per nesting level")
                .value_parser(value_parser!(usize))
                .default_value("2"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (repeatable)")
                .action(ArgAction::Count),
        )
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        Ok(source)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    init_tracing(matches.get_count("verbose"));

    let input = matches
        .get_one::<String>("input")
        .context("missing input argument")?;
    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };
    let labels = if matches.get_flag("full-labels") {
        LabelStyle::Full
    } else {
        LabelStyle::Classic
    };
    let indent = matches.get_one::<usize>("indent").copied().unwrap_or(2);

    let context = RenderContext::new()
        .with_format(format)
        .with_labels(labels)
        .with_indent_width(indent);
    debug!(?context, "render settings");

    let source = read_input(input)?;
    info!(input = %input, bytes = source.len(), "read source");

    let output = goast::render_source(&source, context)
        .with_context(|| format!("failed to parse {}", input))?;

    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let matches = cli().get_matches_from(["goast", "main.go"]);
        assert_eq!(matches.get_one::<String>("format").map(String::as_str), Some("text"));
        assert_eq!(matches.get_one::<usize>("indent"), Some(&2));
        assert!(!matches.get_flag("full-labels"));
        assert_eq!(matches.get_count("verbose"), 0);
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = cli().try_get_matches_from(["goast", "--format", "xml", "main.go"]);
        assert!(result.is_err());
    }
}
