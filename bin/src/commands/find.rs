use super::{open, CommandResult};
use quill_core::{Config, FindOutcome};
use std::{io::Write, path::Path};

/// Print every match of `term`, one per line, as `line:col start..end text`.
///
/// Walks [`quill_core::Editor::find_next`] from the top of the file until it
/// wraps back to the first hit.
pub fn run(
    file: &Path,
    term: &str,
    match_case: bool,
    config: &Config,
    out: &mut impl Write,
) -> CommandResult {
    let mut editor = open(file, config)?;
    let mut first = None;

    loop {
        match editor.find_next(term, match_case) {
            FindOutcome::Found(range) => {
                if first.as_ref() == Some(&range) {
                    break;
                }
                let (line, col) = line_col(editor.text(), range.start);
                let line_text = editor.text()[range.start..]
                    .lines()
                    .next()
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{line}:{col} {}..{} {}",
                    range.start,
                    range.end,
                    line_text.trim_end()
                )?;
                first.get_or_insert(range);
            },
            outcome @ FindOutcome::NotFound { .. } => {
                if let Some(notice) = outcome.notice() {
                    writeln!(out, "{notice}")?;
                }
                break;
            },
            FindOutcome::Skipped => break,
        }
    }

    Ok(())
}

/// One-based line and char column of a byte offset.
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
