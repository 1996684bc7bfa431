use clap::{Parser, Subcommand};

use self::detect::DetectArg;
use crate::logging;

mod detect;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Detect mean shifts in a delimited data file
    Detect(#[clap(flatten)] DetectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose);
    match args.mode {
        Mode::Detect(arg) => detect::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_detect(args: &[&str]) -> DetectArg {
        let argv = ["meanshift", "detect"].into_iter().chain(args.iter().copied());
        let args = CommandArgs::try_parse_from(argv).unwrap();
        match args.mode {
            Mode::Detect(arg) => arg,
        }
    }

    #[test]
    fn test_json_report_to_file() {
        let arg = parse_detect(&["data.csv", "--json", "--output", "report.json"]);
        assert!(arg.json);
        assert_eq!(arg.output.as_deref(), Some(std::path::Path::new("report.json")));
    }

    #[test]
    fn test_output_alone_writes_text_tables() {
        let arg = parse_detect(&["data.csv", "--output", "report.txt"]);
        assert!(!arg.json);
        assert!(arg.output.is_some());
    }

    #[test]
    fn test_verbosity_is_global() {
        let args = CommandArgs::try_parse_from(["meanshift", "detect", "data.csv", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
