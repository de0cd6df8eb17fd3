//! # Validation Module
//!
//! Operator input validation for Gatehouse.
//!
//! ## Validation Strategy
//! Validation happens at the prompt boundary, before any workflow touches
//! storage. The database schema (NOT NULL, CHECK constraints) is the second
//! line of defense.

use crate::error::ValidationError;
use crate::MAX_PLATE_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a vehicle registration number.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most [`MAX_PLATE_LENGTH`] characters
/// - Only alphanumeric characters, hyphens and spaces
///
/// ## Returns
/// The trimmed, upper-cased plate. Plates are matched case-insensitively
/// across entry and exit, so they are normalized once here.
///
/// ## Example
/// ```rust
/// use gatehouse_core::validation::validate_plate;
///
/// assert_eq!(validate_plate(" ab-123 ").unwrap(), "AB-123");
/// assert!(validate_plate("").is_err());
/// ```
pub fn validate_plate(plate: &str) -> ValidationResult<String> {
    let plate = plate.trim();

    if plate.is_empty() {
        return Err(ValidationError::Required {
            field: "plate".to_string(),
        });
    }

    if plate.len() > MAX_PLATE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "plate".to_string(),
            max: MAX_PLATE_LENGTH,
        });
    }

    if !plate
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "plate".to_string(),
            reason: "must contain only letters, numbers, hyphens, and spaces".to_string(),
        });
    }

    Ok(plate.to_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================
