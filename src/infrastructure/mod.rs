//! Infrastructure layer: I/O implementations
//!
//! This layer implements I/O boundary traits and loads scripts and snapshots.

pub mod error;
pub mod source;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use traits::{FileSystem, RealFileSystem};
