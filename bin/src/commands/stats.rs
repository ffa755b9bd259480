use super::{open, CommandResult};
use quill_core::Config;
use std::{io::Write, path::Path};

pub fn run(file: &Path, config: &Config, out: &mut impl Write) -> CommandResult {
    let editor = open(file, config)?;
    writeln!(out, "{}", editor.stats())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_counters() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("doc.txt");
        std::fs::write(&path, "one two\nthree").unwrap();

        let mut out = Vec::new();
        run(&path, &Config::default(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Chars: 13  Words: 3  Lines: 2\n"
        );
    }
}
