use crate::cli::Command;
use quill_core::{Config, Editor};
use std::{io::Write, path::Path};

pub mod find;
pub mod replace;
pub mod run;
pub mod stats;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn handle(command: Command, config: &Config, out: &mut impl Write) -> CommandResult {
    match command {
        Command::Find { file, term, case } => {
            find::run(&file, &term, case.resolve(config.match_case), config, out)
        },
        Command::Replace {
            file,
            term,
            replacement,
            case,
            dry_run,
        } => replace::run(
            &file,
            &term,
            &replacement,
            case.resolve(config.match_case),
            dry_run,
            config,
            out,
        ),
        Command::Stats { file } => stats::run(&file, config, out),
        Command::Run {
            file,
            script,
            write,
        } => run::run(&file, &script, write, config, out),
        Command::Commands => list_commands(out),
    }
}

fn open(path: &Path, config: &Config) -> Result<Editor, quill_core::Error> {
    let mut editor = Editor::new(config);
    editor.open(path)?;
    Ok(editor)
}

fn list_commands(out: &mut impl Write) -> CommandResult {
    for info in quill_core::command::COMMANDS {
        writeln!(out, "{:<64} {}", info.usage, info.description)?;
    }
    Ok(())
}
