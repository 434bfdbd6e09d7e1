//! # Error Types
//!
//! Domain-specific error types for vitaran-core.
//!
//! ## What Is NOT an Error Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock shortfalls and funds shortfalls are SIGNALLED AS DATA            │
//! │  (StockIssue lists, FundsDecision) so the host UI can disable          │
//! │  submission instead of catching an exception.                          │
//! │                                                                         │
//! │  An unknown SKU id on a draft line is not an error either: the line    │
//! │  is skipped and the rest of the quote stays usable.                    │
//! │                                                                         │
//! │  Errors below are reserved for malformed CONSTRUCTION input - the      │
//! │  kind of thing a host bug, not a user, produces.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, limit, value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Engine Error
// =============================================================================

/// Engine-level errors raised while constructing engine inputs.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Draft order has more lines than the engine accepts.
    #[error("Order cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when reference data or draft input doesn't meet
/// requirements. Used for early validation before the engine runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, non-numeric HSN code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A scheme window whose end date precedes its start date.
    #[error("scheme window is inverted: starts {start}, ends {end}")]
    InvalidWindow { start: String, end: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::TooManyLines { max: 100 };
        assert_eq!(err.to_string(), "Order cannot have more than 100 lines");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku_id".to_string(),
        };
        assert_eq!(err.to_string(), "sku_id is required");

        let err = ValidationError::InvalidWindow {
            start: "2026-05-01".to_string(),
            end: "2026-04-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "scheme window is inverted: starts 2026-05-01, ends 2026-04-01"
        );
    }

    #[test]
    fn test_validation_converts_to_engine_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let engine_err: EngineError = validation_err.into();
        assert!(matches!(engine_err, EngineError::Validation(_)));
    }
}
