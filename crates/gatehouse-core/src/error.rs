//! # Error Types
//!
//! Domain-specific error types for gatehouse-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  gatehouse-core errors (this file)                                  │
//! │  ├── CoreError        - Fare computation / domain failures          │
//! │  └── ValidationError  - Operator input validation failures          │
//! │                                                                     │
//! │  gatehouse-db errors (separate crate)                               │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  gatehouse-service errors (separate crate)                          │
//! │  └── ServiceError     - Workflow failures (wraps the above)         │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ServiceError → operator        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (plate, timestamps)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use chrono::{DateTime, Utc};
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent invalid billing inputs or domain corruption.
/// They are fatal to the single fare computation that raised them and are
/// surfaced to the caller, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Fare calculation was invoked without a ticket.
    ///
    /// ## When This Occurs
    /// - A caller tries to bill a session it never looked up
    ///
    /// Kept distinct from [`CoreError::InvalidOutTime`] so the two invalid
    /// inputs are distinguishable in logs and tests.
    #[error("Ticket can not be null")]
    TicketRequired,

    /// The ticket's out-time is missing or precedes its in-time.
    ///
    /// ## When This Occurs
    /// - Billing an open ticket (no out-time recorded yet)
    /// - Clock skew or corrupted timestamps (out before in)
    #[error("Out time provided is incorrect: {out_time:?}")]
    InvalidOutTime {
        out_time: Option<DateTime<Utc>>,
    },

    /// The ticket's spot carries a category with no configured rate.
    ///
    /// ## When This Occurs
    /// - A spot with an unrecognized vehicle type reached billing, which
    ///   indicates data corruption upstream. Surfaced loudly on purpose.
    #[error("Unknown Parking Type")]
    UnknownParkingType,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Operator input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before a workflow touches storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., non-alphanumeric plate).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
