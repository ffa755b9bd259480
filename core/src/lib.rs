//! The editing-state engine behind the Quill plain-text editor, ie the editor
//! minus any GUI/TUI.
//!
//! - [`history`]: snapshot undo/redo and the checkpoint policy
//! - [`search`]: find, replace and replace-all over plain text
//! - [`editor`]: the [`Editor`] facade the UI layer drives
//! - [`command`]: named commands and the script syntax

pub mod clock;
pub mod command;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod paths;
pub mod search;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, ParseCommandError};
pub use config::Config;
pub use document::{Document, Selection};
pub use editor::{Editor, FindOutcome, ReplaceAllOutcome, ReplaceOutcome};
pub use error::{Error, Result};
pub use history::{CheckpointPolicy, CheckpointReason, History};
pub use stats::DocumentStats;
