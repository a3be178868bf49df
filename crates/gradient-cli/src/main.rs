//! Gradient CLI
//!
//! Parses one CSS gradient, normalizes its stops and prints it back.

use std::io::Read;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use gradient_css::{BuildOptions, GradientBuilder, GradientLayer, parse_gradient};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gradient")]
#[command(author, version, about = "Normalize and reformat CSS gradients", long_about = None)]
struct Cli {
    /// Gradient text; read from stdin when omitted
    gradient: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Both)]
    format: Format,

    /// Keep every stop on one line
    #[arg(long, conflicts_with = "multi_line")]
    single_line: bool,

    /// Put every stop on its own line
    #[arg(long)]
    multi_line: bool,

    /// Keep hints sitting at 50%
    #[arg(long)]
    keep_midpoints: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Modern,
    Classic,
    Both,
    Json,
}

impl Cli {
    fn build_options(&self) -> BuildOptions {
        let new_lines = match (self.single_line, self.multi_line) {
            (true, _) => Some(false),
            (_, true) => Some(true),
            _ => None,
        };
        BuildOptions {
            new_lines,
            elide_midpoint_hints: !self.keep_midpoints,
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.gradient {
            Some(text) => Ok(text.clone()),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read gradient from stdin")?;
                Ok(text)
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(fallback)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let input = cli.read_input()?;
    let parsed = parse_gradient(&input).with_context(|| format!("Invalid gradient: {}", input.trim()))?;
    tracing::debug!("Parsed {} gradient", parsed.kind());

    let layer = GradientLayer::from_parsed(parsed);
    let builder = GradientBuilder::new().with_options(cli.build_options());

    match cli.format {
        Format::Modern => println!("{}", builder.modern(&layer)),
        Format::Classic => println!("{}", builder.classic(&layer)),
        Format::Both => {
            let css = builder.build(&layer);
            println!("{}\n{}", css.modern, css.classic);
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(&layer).context("Failed to serialize layer")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_options_from_flags() {
        let cli = Cli::parse_from(["gradient", "--single-line", "--keep-midpoints", "linear-gradient(red, blue)"]);
        assert_eq!(cli.build_options().new_lines, Some(false));
        assert!(!cli.build_options().elide_midpoint_hints);

        let cli = Cli::parse_from(["gradient", "--multi-line", "-f", "json"]);
        assert_eq!(cli.build_options().new_lines, Some(true));
        assert_eq!(cli.format, Format::Json);
        assert!(cli.gradient.is_none());
    }

    #[test]
    fn test_conflicting_line_flags() {
        assert!(Cli::try_parse_from(["gradient", "--single-line", "--multi-line"]).is_err());
    }
}
