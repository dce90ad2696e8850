//! doi-identity command line tool
//!
//! Parse, render, escape and shorten DOIs from the shell.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use doi_identity::{
    escape, unescape, verify_catalog, Doi, DoiConfig, DoiError, ShortIdentifierExtractor,
    UriStyle,
};

#[derive(Debug, Parser)]
#[command(name = "doi-identity", version, about = "Parse, render, escape and shorten DOIs")]
struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(long, global = true, env = "DOI_IDENTITY_CONFIG")]
    config: Option<PathBuf>,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the canonical name and detected style of a DOI
    Parse { raw: String },

    /// Render a DOI with a URI prefix
    Uri {
        raw: String,
        /// Defaults to the configured output style
        #[arg(long)]
        style: Option<UriStyle>,
    },

    /// Escape text for use as a single path segment
    Escape {
        text: String,
        /// Canonicalize first and escape the DOI written in this style
        #[arg(long)]
        style: Option<UriStyle>,
    },

    /// Decode an escaped DOI
    Unescape {
        escaped: String,
        /// Render the result with this style instead of as a bare name
        #[arg(long)]
        style: Option<UriStyle>,
    },

    /// Derive the short identifier of an article DOI
    Short { raw: String },

    /// Check a DOI against the configured journal family
    Validate { raw: String },

    /// List the URI styles
    Styles,
}

fn run(cli: &Cli, config: &DoiConfig) -> Result<String, DoiError> {
    let output = match &cli.command {
        Command::Parse { raw } => {
            let doi = Doi::create(raw)?;
            let style = UriStyle::detect(raw);
            if cli.json {
                json!({ "name": doi, "style": style }).to_string()
            } else {
                match style {
                    Some(style) => format!("{}\t{}", doi, style),
                    None => format!("{}\tbare", doi),
                }
            }
        }
        Command::Uri { raw, style } => {
            let uri = Doi::create(raw)?.as_uri(style.unwrap_or(config.output_style));
            if cli.json {
                json!({ "uri": uri }).to_string()
            } else {
                uri
            }
        }
        Command::Escape { text, style } => {
            let escaped = match style {
                Some(style) => Doi::create(text)?.escaped(Some(*style)),
                None => escape(text),
            };
            if cli.json {
                json!({ "escaped": escaped }).to_string()
            } else {
                escaped
            }
        }
        Command::Unescape { escaped, style } => {
            let doi = unescape(escaped)?;
            let rendered = match style {
                Some(style) => doi.as_uri(*style),
                None => doi.to_string(),
            };
            if cli.json {
                json!({ "name": doi, "rendered": rendered }).to_string()
            } else {
                rendered
            }
        }
        Command::Short { raw } => {
            let extractor = ShortIdentifierExtractor::new(config.journal_family()?);
            let id = extractor.extract(raw)?;
            if cli.json {
                serde_json::to_string(&id).unwrap_or_else(|_| id.to_string())
            } else {
                id.to_string()
            }
        }
        Command::Validate { raw } => {
            let family = config.journal_family()?;
            let valid = family.is_valid_doi(raw);
            if cli.json {
                json!({ "family": family.name(), "valid": valid }).to_string()
            } else {
                valid.to_string()
            }
        }
        Command::Styles => {
            if cli.json {
                let styles: Vec<_> = UriStyle::ALL
                    .iter()
                    .map(|s| json!({ "name": s, "prefix": s.prefix() }))
                    .collect();
                json!(styles).to_string()
            } else {
                UriStyle::ALL
                    .iter()
                    .map(|s| format!("{}\t{}", s, s.prefix()))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    };
    Ok(output)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = verify_catalog() {
        tracing::error!("URI style catalog is inconsistent: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => match DoiConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => DoiConfig::default(),
    };

    match run(&cli, &config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String, DoiError> {
        let cli = Cli::try_parse_from(std::iter::once("doi-identity").chain(args.iter().copied()))
            .unwrap();
        run(&cli, &DoiConfig::default())
    }

    #[test]
    fn parse_reports_style() {
        assert_eq!(
            run_args(&["parse", "doi:10.1371/foo"]).unwrap(),
            "10.1371/foo\tdoi-scheme"
        );
        assert_eq!(run_args(&["parse", "10.1371/foo"]).unwrap(), "10.1371/foo\tbare");
    }

    #[test]
    fn uri_uses_configured_default() {
        assert_eq!(
            run_args(&["uri", "10.1371/foo"]).unwrap(),
            "info:doi/10.1371/foo"
        );
        assert_eq!(
            run_args(&["uri", "info:doi/10.1371/foo", "--style", "https-doi-resolver"]).unwrap(),
            "https://doi.org/10.1371/foo"
        );
    }

    #[test]
    fn escape_and_unescape() {
        assert_eq!(run_args(&["escape", "10.1371/a+b"]).unwrap(), "10.1371++a+-b");
        assert_eq!(
            run_args(&["escape", "doi:10.1371/a", "--style", "info-doi"]).unwrap(),
            "info:doi++10.1371++a"
        );
        assert_eq!(
            run_args(&["unescape", "info:doi++10.1371++a"]).unwrap(),
            "10.1371/a"
        );
    }

    #[test]
    fn short_and_validate() {
        assert_eq!(
            run_args(&["short", "info:doi/10.1371/journal.pone.0053052"]).unwrap(),
            "pone.0053052"
        );
        assert_eq!(
            run_args(&["validate", "10.1371/journal.pone.0055747.t004"]).unwrap(),
            "true"
        );
    }

    #[test]
    fn json_output() {
        let out = run_args(&["--json", "short", "pntd.0002035"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["code"], "pntd");
        assert_eq!(value["number"], "0002035");
    }

    #[test]
    fn input_errors_are_client_errors() {
        let err = run_args(&["unescape", "a+a"]).unwrap_err();
        assert!(err.is_client_error());
        assert!(run_args(&["short", "info:doi/10.1371/image.pntd.v07.i01"]).is_err());
    }

    #[test]
    fn styles_lists_catalog() {
        let out = run_args(&["styles"]).unwrap();
        assert_eq!(out.lines().count(), UriStyle::ALL.len());
        assert!(out.starts_with("info-doi\tinfo:doi/"));
    }
}
