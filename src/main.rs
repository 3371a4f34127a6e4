// enumconf: enumeration registry inspector

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, warn};

use enumconf::parser::lexer::Lexer;
use enumconf::parser::parse::{ParseOutput, Parser, ParserOptions};
use enumconf::registry::Registry;

fn cli() -> Command {
    Command::new("enumconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect enumeration registry files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("max-errors")
                .long("max-errors")
                .global(true)
                .value_parser(value_parser!(usize))
                .help("Stop after this many rejected declarations"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream")
                .arg(path_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the parsed entries")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["text", "json"])
                        .default_value("text")
                        .help("Output format"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Exit with an error if any declaration was rejected"),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Print the title registered for an id")
                .arg(path_arg())
                .arg(
                    Arg::new("id")
                        .required(true)
                        .index(2)
                        .value_parser(value_parser!(u32))
                        .help("Registry id to look up"),
                ),
        )
}

fn path_arg() -> Arg {
    Arg::new("path")
        .required(true)
        .index(1)
        .help("Path to the registry source file")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("tokens", sub)) => handle_tokens(sub),
        Some(("parse", sub)) => handle_parse(sub, parser_options(sub)),
        Some(("lookup", sub)) => handle_lookup(sub, parser_options(sub)),
        _ => unreachable!("subcommand_required is set"),
    }
}

/// Global flags land on the subcommand's matches.
fn parser_options(matches: &ArgMatches) -> ParserOptions {
    ParserOptions {
        max_recovered_errors: matches.get_one::<usize>("max-errors").copied(),
    }
}

fn read_source(matches: &ArgMatches) -> Result<String> {
    let path = matches
        .get_one::<String>("path")
        .context("missing input path")?;
    info!("reading {}", path);
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))
}

fn parse_file(matches: &ArgMatches, options: ParserOptions) -> Result<ParseOutput> {
    let source = read_source(matches)?;
    let tokens = Lexer::new(&source).tokenize_all();
    Ok(Parser::with_options(tokens, options).parse_with_diagnostics())
}

fn handle_tokens(matches: &ArgMatches) -> Result<()> {
    let source = read_source(matches)?;

    for token in Lexer::new(&source).tokenize_all() {
        println!("{} '{}' line {}", token.kind.name(), token.lexeme, token.line);
    }

    Ok(())
}

fn handle_parse(matches: &ArgMatches, options: ParserOptions) -> Result<()> {
    let output = parse_file(matches, options)?;

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!("{}", serde_json::to_string_pretty(&output.entries)?),
        _ => {
            for entry in &output.entries {
                println!("{}", entry);
            }
        }
    }

    if output.truncated {
        warn!("parsing stopped early after {} errors", output.diagnostics.len());
    }

    if matches.get_flag("strict") && !output.is_clean() {
        anyhow::bail!("{} declaration(s) rejected", output.diagnostics.len());
    }

    Ok(())
}

fn handle_lookup(matches: &ArgMatches, options: ParserOptions) -> Result<()> {
    let id = *matches.get_one::<u32>("id").context("missing id")?;
    let output = parse_file(matches, options)?;
    let registry = Registry::from_entries(output.entries)?;

    match registry.title(id) {
        Some(title) => {
            println!("{}", title);
            Ok(())
        }
        None => {
            eprintln!("Error: id {} is not registered", id);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_global_max_errors() {
        let matches = cli()
            .try_get_matches_from(["enumconf", "parse", "--max-errors", "3", "file.conf"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(parser_options(sub).max_recovered_errors, Some(3));
        assert_eq!(sub.get_one::<String>("format").map(String::as_str), Some("text"));
        assert!(!sub.get_flag("strict"));
    }
}
