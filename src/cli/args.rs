use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "obit-report")]
#[command(
    author,
    version,
    about = "Obituary archive report generator: reference codes and PDF reports"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the PDF endpoints over HTTP
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,

        /// Records JSON file to serve from
        #[arg(long)]
        records: PathBuf,

        /// Logo image URL embedded in report headers
        #[arg(long)]
        logo_url: Option<String>,
    },

    /// Render one record's detail report to a PDF file
    Record {
        /// 8-character reference code, e.g. ERIC0004
        reference: String,

        /// Records JSON file
        #[arg(long)]
        records: PathBuf,

        /// Output PDF path (defaults to <REFERENCE>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Logo image URL embedded in report headers
        #[arg(long)]
        logo_url: Option<String>,
    },

    /// Render a search-results report to a PDF file
    Search {
        /// Surname search query
        query: String,

        /// Records JSON file
        #[arg(long)]
        records: PathBuf,

        /// Output PDF path (defaults to search-results.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Logo image URL embedded in report headers
        #[arg(long)]
        logo_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_command_parses_with_output_omitted() {
        let args = Args::try_parse_from([
            "obit-report",
            "record",
            "ERIC0004",
            "--records",
            "records.json",
        ])
        .unwrap();
        match args.command {
            Command::Record {
                reference, output, ..
            } => {
                assert_eq!(reference, "ERIC0004");
                assert!(output.is_none());
            }
            other => panic!("expected record command, got {other:?}"),
        }
    }

    #[test]
    fn explicit_output_flag_is_captured() {
        let args = Args::try_parse_from([
            "obit-report",
            "search",
            "ericksen",
            "--records",
            "records.json",
            "--output",
            "out/report.pdf",
        ])
        .unwrap();
        match args.command {
            Command::Search { query, output, .. } => {
                assert_eq!(query, "ericksen");
                assert_eq!(output, Some(PathBuf::from("out/report.pdf")));
            }
            other => panic!("expected search command, got {other:?}"),
        }
    }
}
