//! Domain layer: the outline model and everything that edits or walks it
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod mutation;
pub mod navigation;
pub mod snapshot;
pub mod zoom;

pub use arena::{Outline, OutlineIterator};
pub use entities::{BulletId, BulletNode};
pub use error::{DomainError, DomainResult};
pub use snapshot::BulletSnapshot;
pub use zoom::ZoomState;
