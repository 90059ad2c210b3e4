//! Line-oriented scripts of editor commands.
//!
//! ```text
//! # shopping list
//! type groceries
//! enter
//! tab
//! type milk
//! ```
//!
//! One command per line; blank lines and `#` comments are skipped. `type`
//! takes the rest of the line verbatim (possibly empty), `focus` a numeric id.

use tracing::{debug, info, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::keymap::Key;
use crate::application::session::{Command, Session};
use crate::domain::BulletId;

/// A parsed command together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub line: usize,
    pub command: Command,
}

pub fn parse_script(source: &str) -> ApplicationResult<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim_start();
        if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command = parse_line(trimmed).map_err(|message| ApplicationError::Script { line, message })?;
        steps.push(ScriptStep { line, command });
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Command, String> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, Some(rest)),
        None => (line.trim_end(), None),
    };
    match word {
        "type" => Ok(Command::Type(rest.unwrap_or_default().to_string())),
        "focus" => {
            let raw = rest.map(str::trim).unwrap_or_default();
            raw.parse::<u64>()
                .map(|id| Command::Focus(BulletId(id)))
                .map_err(|_| format!("focus needs a numeric id, got '{raw}'"))
        }
        "toggle" => Ok(Command::ToggleExpanded),
        "zoom-in" => Ok(Command::ZoomIn),
        "zoom-out" => Ok(Command::ZoomOut),
        other => {
            if rest.is_some_and(|r| !r.trim().is_empty()) {
                return Err(format!("'{other}' takes no argument"));
            }
            other.parse::<Key>().map(Command::Key)
        }
    }
}

/// Run every step against `session` and return the final state.
#[instrument(level = "debug", skip(session, steps), fields(steps = steps.len()))]
pub fn replay(session: Session, steps: &[ScriptStep]) -> Session {
    let end = steps.iter().fold(session, |session, step| {
        let outcome = session.apply(step.command.clone());
        if let Some(target) = outcome.focus_request {
            debug!(line = step.line, %target, "focus requested");
        }
        outcome.session
    });
    info!(bullets = end.outline().node_count(), "replay finished");
    end
}
