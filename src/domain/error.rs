//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::BulletId;

/// Domain errors represent rejected outline operations.
///
/// None of these is fatal: the engine's lenient operations log them and hand
/// back the unchanged outline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("bullet not found: {0}")]
    NotFound(BulletId),

    #[error("invalid move of {id}: {reason}")]
    InvalidMove { id: BulletId, reason: &'static str },

    #[error("moving {id} under {target} would make it its own ancestor")]
    CycleRisk { id: BulletId, target: BulletId },

    #[error("no bullet ids left to hand out")]
    IdsExhausted,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("invariant violated at {id}: {message}")]
    InvariantViolation { id: BulletId, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
