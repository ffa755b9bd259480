use super::{open, CommandResult};
use quill_core::{Config, ReplaceAllOutcome};
use std::{io::Write, path::Path};
use tracing::info;

pub fn run(
    file: &Path,
    term: &str,
    replacement: &str,
    match_case: bool,
    dry_run: bool,
    config: &Config,
    out: &mut impl Write,
) -> CommandResult {
    let mut editor = open(file, config)?;

    match editor.replace_all(term, replacement, match_case) {
        ReplaceAllOutcome::Replaced { count } => {
            if dry_run {
                write!(out, "{}", editor.text())?;
            } else {
                editor.save()?;
                info!(count, "replaced in {}", file.display());
                writeln!(out, "Replaced {count} occurrence(s)")?;
            }
        },
        outcome @ ReplaceAllOutcome::NoOccurrences { .. } => {
            if let Some(notice) = outcome.notice() {
                writeln!(out, "{notice}")?;
            }
        },
        ReplaceAllOutcome::Skipped => writeln!(out, "Nothing to replace")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture(text: &str) -> (TempDir, std::path::PathBuf) {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("doc.txt");
        std::fs::write(&path, text).unwrap();
        (tmp_dir, path)
    }

    #[test]
    fn writes_result_back() {
        let (_tmp_dir, path) = fixture("aXaXa");
        let mut out = Vec::new();
        run(&path, "X", "-", true, false, &Config::default(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Replaced 2 occurrence(s)\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a-a-a");
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let (_tmp_dir, path) = fixture("Foo foo");
        let mut out = Vec::new();
        run(&path, "foo", "bar", false, true, &Config::default(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "bar bar");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Foo foo");
    }

    #[test]
    fn no_occurrences() {
        let (_tmp_dir, path) = fixture("hello");
        let mut out = Vec::new();
        run(&path, "z", "y", false, false, &Config::default(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No occurrences of \"z\" found.\n"
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("missing.txt");
        let mut out = Vec::new();
        assert!(run(&path, "a", "b", false, false, &Config::default(), &mut out).is_err());
    }
}
