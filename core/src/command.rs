//! Command dispatch: one name per editor operation.
//!
//! Menus, toolbar buttons, shortcuts and scripts all funnel through
//! [`Editor::dispatch`], so none of them call engine methods directly.
//!
//! # Script syntax
//!
//! One command per line. Arguments are bare words or double-quoted strings
//! (`\"`, `\\`, `\n`, `\t` escapes). `#` starts a comment line.
//! Case flags only apply to commands that list them, and a quoted
//! `"--match-case"` is plain text.
//!
//! ```text
//! insert "Hello world. "
//! find "world" --match-case
//! replace-all "o" "0"
//! undo
//! ```

use crate::{
    clock::Clock,
    document::Selection,
    editor::Editor,
};
use snafu::{ensure, OptionExt, Snafu};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Undo,
    Redo,
    Insert(String),
    SetText(String),
    Select {
        start: usize,
        len: usize,
    },
    FindNext {
        term: String,
        match_case: Option<bool>,
    },
    ReplaceCurrent {
        term: String,
        replacement: String,
        match_case: Option<bool>,
    },
    ReplaceAll {
        term: String,
        replacement: String,
        match_case: Option<bool>,
    },
}

pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "new",
        usage: "new",
        description: "Start an empty document and clear history",
    },
    CommandInfo {
        name: "undo",
        usage: "undo",
        description: "Restore the previous checkpoint",
    },
    CommandInfo {
        name: "redo",
        usage: "redo",
        description: "Reapply the last undone checkpoint",
    },
    CommandInfo {
        name: "insert",
        usage: "insert <text>",
        description: "Type text over the selection",
    },
    CommandInfo {
        name: "set-text",
        usage: "set-text <text>",
        description: "Replace the whole buffer as a user edit",
    },
    CommandInfo {
        name: "select",
        usage: "select <start> <len>",
        description: "Set the selection (byte offsets)",
    },
    CommandInfo {
        name: "find",
        usage: "find <term> [--match-case|--ignore-case]",
        description: "Select the next match, wrapping at the end",
    },
    CommandInfo {
        name: "replace",
        usage: "replace <term> <replacement> [--match-case|--ignore-case]",
        description: "Replace the selected match, then find the next",
    },
    CommandInfo {
        name: "replace-all",
        usage: "replace-all <term> <replacement> [--match-case|--ignore-case]",
        description: "Replace every match as one undo step",
    },
];

const CASE_FLAGS: &str = "[--match-case|--ignore-case]";

pub fn lookup(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|info| info.name == name)
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseCommandError {
    #[snafu(display("empty command"))]
    Empty,

    #[snafu(display("unknown command: {name}"))]
    Unknown { name: String },

    #[snafu(display("unterminated string"))]
    UnterminatedString,

    #[snafu(display("usage: {usage}"))]
    Usage { usage: &'static str },

    #[snafu(display("invalid number: {value}"))]
    InvalidNumber { value: String },

    #[snafu(display("line {line}: {source}"))]
    Line {
        line: usize,
        source: Box<ParseCommandError>,
    },
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = tokenize(line)?.into_iter();
        let name = words.next().context(EmptySnafu)?.text;
        let info = lookup(&name).context(UnknownSnafu { name: name.clone() })?;
        let takes_case = info.usage.contains(CASE_FLAGS);

        let mut args = Vec::new();
        let mut match_case = None;
        for word in words {
            if word.quoted || !word.text.starts_with("--") {
                args.push(word.text);
                continue;
            }
            match word.text.as_str() {
                "--match-case" if takes_case => match_case = Some(true),
                "--ignore-case" if takes_case => match_case = Some(false),
                _ => return UsageSnafu { usage: info.usage }.fail(),
            }
        }

        let expected = info.usage.split_whitespace().filter(|w| w.starts_with('<')).count();
        ensure!(args.len() == expected, UsageSnafu { usage: info.usage });
        let mut args = args.into_iter();
        let mut arg = || args.next().unwrap_or_default();

        let command = match name.as_str() {
            "new" => Command::New,
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "insert" => Command::Insert(arg()),
            "set-text" => Command::SetText(arg()),
            "select" => Command::Select {
                start: parse_number(arg())?,
                len: parse_number(arg())?,
            },
            "find" => Command::FindNext {
                term: arg(),
                match_case,
            },
            "replace" => Command::ReplaceCurrent {
                term: arg(),
                replacement: arg(),
                match_case,
            },
            "replace-all" => Command::ReplaceAll {
                term: arg(),
                replacement: arg(),
                match_case,
            },
            _ => return UnknownSnafu { name: name.clone() }.fail(),
        };
        Ok(command)
    }
}

/// Parse a script, skipping blank lines and `#` comments.
pub fn parse_script(source: &str) -> Result<Vec<Command>, ParseCommandError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            line.parse().map_err(|err| ParseCommandError::Line {
                line: index + 1,
                source: Box::new(err),
            })
        })
        .collect()
}

fn parse_number(value: String) -> Result<usize, ParseCommandError> {
    value
        .parse()
        .ok()
        .context(InvalidNumberSnafu { value })
}

/// A script word. Quoted words are never read as flags.
struct Token {
    text: String,
    quoted: bool,
}

fn tokenize(line: &str) -> Result<Vec<Token>, ParseCommandError> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let mut text = String::new();
        let quoted = ch == '"';
        if quoted {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some(other) => text.push(other),
                        None => return UnterminatedStringSnafu.fail(),
                    },
                    Some(other) => text.push(other),
                    None => return UnterminatedStringSnafu.fail(),
                }
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                text.push(ch);
                chars.next();
            }
        }
        words.push(Token { text, quoted });
    }

    Ok(words)
}

impl<C: Clock> Editor<C> {
    /// Run a command, returning the notice to show the user, if any.
    pub fn dispatch(&mut self, command: Command) -> Option<String> {
        debug!(?command, "dispatch");
        match command {
            Command::New => {
                self.new_document();
                None
            },
            Command::Undo => {
                self.undo();
                None
            },
            Command::Redo => {
                self.redo();
                None
            },
            Command::Insert(text) => {
                self.insert(&text);
                None
            },
            Command::SetText(text) => {
                self.set_text(text);
                None
            },
            Command::Select { start, len } => {
                self.set_selection(Selection::new(start, len));
                None
            },
            Command::FindNext { term, match_case } => {
                let match_case = match_case.unwrap_or(self.match_case());
                self.find_next(&term, match_case).notice()
            },
            Command::ReplaceCurrent {
                term,
                replacement,
                match_case,
            } => {
                let match_case = match_case.unwrap_or(self.match_case());
                self.replace_current(&term, &replacement, match_case)
                    .next
                    .notice()
            },
            Command::ReplaceAll {
                term,
                replacement,
                match_case,
            } => {
                let match_case = match_case.unwrap_or(self.match_case());
                self.replace_all(&term, &replacement, match_case).notice()
            },
        }
    }

    /// Run commands in order, collecting notices.
    pub fn run_script(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<String> {
        commands
            .into_iter()
            .filter_map(|command| self.dispatch(command))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_parses() {
        let samples = [
            "new",
            "undo",
            "redo",
            "insert x",
            "set-text x",
            "select 1 2",
            "find x",
            "replace x y",
            "replace-all x y",
        ];
        assert_eq!(samples.len(), COMMANDS.len());
        for sample in samples {
            assert!(sample.parse::<Command>().is_ok(), "{sample}");
        }
    }

    #[test]
    fn parses_quoted_arguments() {
        let command: Command = r#"replace-all "a b" "c\"d\n" --match-case"#.parse().unwrap();
        assert_eq!(
            command,
            Command::ReplaceAll {
                term: "a b".into(),
                replacement: "c\"d\n".into(),
                match_case: Some(true),
            }
        );
    }

    #[test]
    fn case_flag_defaults_to_none() {
        let command: Command = "find cat".parse().unwrap();
        assert_eq!(
            command,
            Command::FindNext {
                term: "cat".into(),
                match_case: None,
            }
        );
        let command: Command = "find cat --ignore-case".parse().unwrap();
        assert!(matches!(
            command,
            Command::FindNext {
                match_case: Some(false),
                ..
            }
        ));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "paste".parse::<Command>(),
            Err(ParseCommandError::Unknown {
                name: "paste".into()
            })
        );
        assert_eq!(
            "insert \"abc".parse::<Command>(),
            Err(ParseCommandError::UnterminatedString)
        );
        assert!(matches!(
            "replace x".parse::<Command>(),
            Err(ParseCommandError::Usage { .. })
        ));
        assert_eq!(
            "select a 1".parse::<Command>(),
            Err(ParseCommandError::InvalidNumber { value: "a".into() })
        );
    }

    #[test]
    fn quoted_flag_text_is_an_argument() {
        assert_eq!(
            r#"find "--match-case""#.parse::<Command>(),
            Ok(Command::FindNext {
                term: "--match-case".into(),
                match_case: None,
            })
        );
        assert_eq!(
            r#"insert "--ignore-case""#.parse::<Command>(),
            Ok(Command::Insert("--ignore-case".into()))
        );
        assert_eq!(
            r#"replace-all "--match-case" x --ignore-case"#.parse::<Command>(),
            Ok(Command::ReplaceAll {
                term: "--match-case".into(),
                replacement: "x".into(),
                match_case: Some(false),
            })
        );
    }

    #[test]
    fn flags_rejected_where_not_accepted() {
        assert_eq!(
            "undo --match-case".parse::<Command>(),
            Err(ParseCommandError::Usage { usage: "undo" })
        );
        assert!(matches!(
            "insert x --ignore-case".parse::<Command>(),
            Err(ParseCommandError::Usage { .. })
        ));
        assert!(matches!(
            "find x --whole-word".parse::<Command>(),
            Err(ParseCommandError::Usage { .. })
        ));
    }

    #[test]
    fn script_reports_line_numbers() {
        let err = parse_script("undo\n\n# comment\nbogus\n").unwrap_err();
        assert_eq!(err.to_string(), "line 4: unknown command: bogus");
    }

    #[test]
    fn dispatch_runs_editor_operations() {
        let mut editor = Editor::with_text("aXaXa");
        let script = parse_script(
            r#"
            replace-all "x" "-"
            find "nope"
            undo
            "#,
        )
        .unwrap();

        let notices = editor.run_script(script);
        assert_eq!(notices, vec!["Cannot find \"nope\".".to_string()]);
        assert_eq!(editor.text(), "aXaXa");
        assert!(editor.can_redo());
    }

    #[test]
    fn dispatch_new_clears_document() {
        let mut editor = Editor::with_text("hello");
        editor.dispatch(Command::Insert("oh ".into()));
        assert!(editor.is_dirty());

        assert_eq!(editor.dispatch(Command::New), None);
        assert_eq!(editor.text(), "");
        assert!(!editor.is_dirty());
        assert!(!editor.can_undo());
    }
}
