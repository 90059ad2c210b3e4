//! Application layer: editor session, key handling and scripted replay
//!
//! This layer turns input events into domain operations and owns the current state.

pub mod codec;
pub mod error;
pub mod keymap;
pub mod script;
pub mod session;

pub use codec::{export_json, import_json};
pub use error::{ApplicationError, ApplicationResult};
pub use keymap::Key;
pub use script::{parse_script, replay, ScriptStep};
pub use session::{Command, Outcome, Session};
