// javelin: parse a Java-family source file and print its syntax tree

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use crossterm::style::Stylize;
use tracing_subscriber::{fmt, EnvFilter};

use javelin::{ParseError, ParseResult, Parser, Scanner};

/// Parse a source file and print its syntax tree or token stream.
#[derive(Debug, clap::Parser)]
#[command(name = "javelin", version, about)]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// Print the tree as built, before wrapper nodes are collapsed
    #[arg(long)]
    raw: bool,

    /// Print the token stream instead of the tree
    #[arg(long, conflicts_with = "raw")]
    tokens: bool,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr, filtered through RUST_LOG
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::trace!("parsing: file={:?}, raw={}, tokens={}", args.file, args.raw, args.tokens);

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> ParseResult<String> {
    let mut scanner = Scanner::open(&args.file)?;

    if args.tokens {
        let tokens = scanner.tokenize()?;
        return Ok(tokens
            .iter()
            .map(|token| {
                format!(
                    "{:>4}:{:<4} {:<16} {}\n",
                    token.location.line(),
                    token.location.column(),
                    format!("{:?}", token.kind),
                    token.text
                )
            })
            .collect());
    }

    let mut parser = Parser::new(scanner)?;
    let unit = parser.parse_compilation_unit()?;
    let tree = if args.raw { unit } else { unit.collapsed() };
    Ok(tree.to_string())
}

fn report(err: &ParseError) {
    let label = if err.is_lexical() {
        "lexical error"
    } else if err.is_grammar() {
        "syntax error"
    } else {
        "error"
    };
    eprintln!("{}: {}", label.red().bold(), err.to_string().bold());

    match (err.location(), std::error::Error::source(err)) {
        (Some(location), _) => eprintln!("{}", location.render()),
        (None, Some(cause)) => eprintln!("  {} {cause}", "caused by:".dark_grey()),
        (None, None) => {}
    }
}
