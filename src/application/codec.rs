//! JSON form of an outline snapshot.
//!
//! Snapshots nest one JSON object per level, so both directions run through
//! `serde_stacker`, which grows the stack on the heap. The parser's recursion
//! limit is lifted; any outline the engine can build can be read back.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::error::ApplicationResult;
use crate::domain::{BulletSnapshot, Outline};

pub fn export_json(outline: &Outline, pretty: bool) -> ApplicationResult<String> {
    let snapshot = outline.to_snapshot();
    let mut buffer = Vec::new();
    if pretty {
        let mut json = serde_json::Serializer::pretty(&mut buffer);
        snapshot.serialize(serde_stacker::Serializer::new(&mut json))?;
    } else {
        let mut json = serde_json::Serializer::new(&mut buffer);
        snapshot.serialize(serde_stacker::Serializer::new(&mut json))?;
    }
    String::from_utf8(buffer)
        .map_err(|e| <serde_json::Error as serde::ser::Error>::custom(e).into())
}

/// Parse and validate a snapshot.
pub fn import_json(source: &str) -> ApplicationResult<Outline> {
    let mut json = serde_json::Deserializer::from_str(source);
    json.disable_recursion_limit();
    let snapshot = Vec::<BulletSnapshot>::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    let outline = Outline::from_snapshot(&snapshot)?;
    debug!(bullets = outline.node_count(), "snapshot imported");
    Ok(outline)
}
