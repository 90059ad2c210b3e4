//! flocky: the core of an outline editor.
//!
//! An outline is a forest of bullets that can be edited one bullet at a time:
//! inserted, typed into, indented and unindented, collapsed, deleted, and
//! zoomed into. Every edit returns a new [`Outline`](domain::Outline) and leaves
//! the old one intact; untouched bullets are shared between the two.
//!
//! Layers, innermost first:
//! - [`domain`]: the arena-backed outline, mutation engine, navigation, zoom
//! - [`application`]: the editor [`Session`](application::Session), keys, scripts
//! - [`infrastructure`]: reading scripts and snapshots
//! - [`cli`]: the `flocky` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod render;
pub mod util;
