use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface configuration
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file, overriding any discovered `.quill/config.toml`
    #[arg(long, global = true, env = "QUILL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path or directory
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every match of a term in a file
    Find {
        file: PathBuf,
        term: String,
        #[command(flatten)]
        case: CaseArgs,
    },
    /// Replace every match of a term and write the file back
    Replace {
        file: PathBuf,
        term: String,
        replacement: String,
        #[command(flatten)]
        case: CaseArgs,
        /// Print the result instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print character, word and line counts
    Stats { file: PathBuf },
    /// Run an editor command script against a file
    Run {
        file: PathBuf,
        script: PathBuf,
        /// Save the result back to the file instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// List the commands a script can use
    Commands,
}

#[derive(Debug, Default, Clone, Copy, Args)]
pub struct CaseArgs {
    /// Compare case-sensitively
    #[arg(long)]
    pub match_case: bool,

    /// Compare case-insensitively
    #[arg(long, conflicts_with = "match_case")]
    pub ignore_case: bool,
}

impl CaseArgs {
    /// Resolve the flags against the configured default.
    pub fn resolve(self, default: bool) -> bool {
        if self.match_case {
            true
        } else if self.ignore_case {
            false
        } else {
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_replace_with_flags() {
        let cli = Cli::try_parse_from([
            "quill",
            "replace",
            "notes.txt",
            "foo",
            "bar",
            "--match-case",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Command::Replace {
                term,
                replacement,
                case,
                dry_run,
                ..
            } => {
                assert_eq!(term, "foo");
                assert_eq!(replacement, "bar");
                assert!(case.resolve(false));
                assert!(dry_run);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn case_flags_conflict() {
        let result = Cli::try_parse_from([
            "quill",
            "find",
            "a.txt",
            "x",
            "--match-case",
            "--ignore-case",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn case_resolution() {
        assert!(CaseArgs::default().resolve(true));
        assert!(!CaseArgs::default().resolve(false));
        let ignore = CaseArgs {
            match_case: false,
            ignore_case: true,
        };
        assert!(!ignore.resolve(true));
    }
}
