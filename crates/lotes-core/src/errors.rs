//! Cross-cutting error types for the parcel registry.
//!
//! `ValidationError` covers caller-correctable input problems and is surfaced
//! verbatim. `CoreError` adds the authorization, lookup, and concurrency
//! failures that any crate may raise. Storage failures are defined in
//! `lotes-db` as `DatabaseError`, which wraps `CoreError`.

use thiserror::Error;

use crate::area::Area;
use crate::enums::EntityType;

/// Caller-correctable input problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid area value '{input}'")]
    InvalidArea { input: String },

    #[error("built area cannot be negative (got {0} m²)")]
    NegativeBuiltArea(Area),

    #[error("demolished area cannot be negative (got {0} m²)")]
    NegativeDemolishedArea(Area),

    #[error("parcel area cannot be negative (got {0} m²)")]
    NegativeParcelArea(Area),

    #[error("approval date {0} is in the future")]
    FutureApprovalDate(chrono::NaiveDate),

    #[error("resulting area cannot be negative ({current} m² {delta:+} m² = {result} m²)")]
    NegativeResultingArea {
        current: Area,
        delta: Area,
        result: Area,
    },

    #[error("new area must be greater than zero (got {0} m²)")]
    NonPositiveArea(Area),

    #[error("new area must differ from the current area ({0} m²)")]
    UnchangedArea(Area),

    #[error("batch entry {index}: {source}")]
    BatchEntry {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("invalid CPF")]
    InvalidCpf,

    #[error("field '{0}' is required")]
    MissingField(&'static str),

    #[error("a parcel holds at most {max} images (got {got})")]
    TooManyImages { max: usize, got: usize },

    #[error("the privacy policy must be accepted to register")]
    PrivacyConsentRequired,
}

/// Errors that can be raised by any crate in the system.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The acting user lacks permission for the operation.
    #[error("Permission denied: {action}")]
    Unauthorized { action: String },

    /// The entity changed since it was read (optimistic version check failed).
    #[error("Concurrent modification: {entity_type} {id} changed since it was read")]
    Conflict { entity_type: EntityType, id: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse error category used to decide what the user is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-correctable; the message is shown verbatim.
    Validation,
    /// Permission denied; a generic message is shown.
    Authorization,
    /// Infrastructure failure; a generic retry message is shown.
    Persistence,
}

pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to perform this operation";
pub const PERSISTENCE_FAILURE_MESSAGE: &str =
    "An unexpected error occurred while saving. Please try again";
pub const CONFLICT_MESSAGE: &str =
    "This parcel was modified by someone else. Reload it and try again";

impl CoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::NotFound { .. } | Self::Conflict { .. } => {
                ErrorKind::Validation
            }
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::Other(_) => ErrorKind::Persistence,
        }
    }

    /// Message safe to show an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { entity_type, .. } => format!("{entity_type} not found"),
            Self::Conflict { .. } => CONFLICT_MESSAGE.to_string(),
            Self::Unauthorized { .. } => PERMISSION_DENIED_MESSAGE.to_string(),
            Self::Other(_) => PERSISTENCE_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
        }
    }

    pub fn not_found(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn conflict(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::Conflict {
            entity_type,
            id: id.into(),
        }
    }
}
