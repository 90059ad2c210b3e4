//! Loading scripts and snapshots from files or stdin.

use std::path::Path;

use tracing::debug;

use crate::application::{import_json, parse_script, ScriptStep};
use crate::domain::Outline;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::FileSystem;

/// Read `path`, or standard input when no path is given.
pub fn read_text(fs: &dyn FileSystem, path: Option<&Path>) -> InfraResult<String> {
    match path {
        Some(path) => {
            if !fs.is_file(path) {
                return Err(InfraError::NotAFile(path.to_path_buf()));
            }
            debug!(path = %path.display(), "reading file");
            fs.read_to_string(path)
                .map_err(|e| InfraError::io(format!("read {}", path.display()), e))
        }
        None => fs
            .read_stdin()
            .map_err(|e| InfraError::io("read stdin", e)),
    }
}

pub fn load_script(fs: &dyn FileSystem, path: Option<&Path>) -> InfraResult<Vec<ScriptStep>> {
    let source = read_text(fs, path)?;
    Ok(parse_script(&source)?)
}

pub fn load_snapshot(fs: &dyn FileSystem, path: &Path) -> InfraResult<Outline> {
    let source = read_text(fs, Some(path))?;
    Ok(import_json(&source)?)
}
