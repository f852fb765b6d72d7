//! Command-line argument parsing for the driver
//!
//! Supports:
//! - Loading a document (default document otherwise)
//! - Replaying an interaction script against it
//! - Writing the resulting source out
//! - Printing host events as JSON lines

use clap::Parser;
use std::path::PathBuf;

/// Live source/rendered-view sync engine
#[derive(Parser, Debug)]
#[command(
    name = "livesync",
    version,
    about = "Keep an HTML source and its editable rendering in sync"
)]
pub struct CliArgs {
    /// HTML document to load
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// YAML interaction script to replay
    #[arg(short, long, value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Write the final source here (stdout if omitted)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print host events to stdout as JSON lines
    #[arg(short = 'e', long)]
    pub print_events: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let args = CliArgs::parse_from([
            "livesync",
            "page.html",
            "--script",
            "s.yaml",
            "-o",
            "out.html",
            "--print-events",
        ]);
        assert_eq!(args.input, Some(PathBuf::from("page.html")));
        assert_eq!(args.script, Some(PathBuf::from("s.yaml")));
        assert_eq!(args.output, Some(PathBuf::from("out.html")));
        assert!(args.print_events);
    }

    #[test]
    fn test_parse_empty() {
        let args = CliArgs::parse_from(["livesync"]);
        assert!(args.input.is_none());
        assert!(args.script.is_none());
        assert!(!args.print_events);
    }
}
