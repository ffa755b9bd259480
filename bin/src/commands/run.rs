use super::{open, CommandResult};
use quill_core::{command::parse_script, Config};
use std::{io::Write, path::Path};
use tracing::debug;

/// Open `file`, run every command in `script`, then print or save the result.
///
/// Notices (not-found and the like) are printed as they come, prefixed with
/// `! ` so they stand apart from the document text.
pub fn run(
    file: &Path,
    script: &Path,
    write: bool,
    config: &Config,
    out: &mut impl Write,
) -> CommandResult {
    let source = std::fs::read_to_string(script)
        .map_err(|e| format!("Failed to read script '{}': {}", script.display(), e))?;
    let commands = parse_script(&source)?;
    debug!(count = commands.len(), "parsed script");

    let mut editor = open(file, config)?;
    for notice in editor.run_script(commands) {
        writeln!(out, "! {notice}")?;
    }

    if write {
        if editor.is_dirty() {
            editor.save()?;
        }
        writeln!(out, "{}", editor.stats())?;
    } else {
        write!(out, "{}", editor.text())?;
    }
    Ok(())
}
