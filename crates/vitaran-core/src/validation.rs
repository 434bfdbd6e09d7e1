//! # Validation Module
//!
//! Input validation utilities for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin SPA (TypeScript)                                       │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (engine boundary)                                │
//! │  ├── Draft line quantities, scheme shapes, id formats                  │
//! │  └── Rejects host bugs before the engine computes anything             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: API service (authoritative)                                  │
//! │  └── Re-validates and persists; the engine is advisory only            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitaran_core::validation::{validate_quantity, validate_hsn_code};
//!
//! validate_quantity(50).unwrap();
//! validate_hsn_code("340213").unwrap();
//! ```

use crate::error::ValidationError;
use crate::schemes::Scheme;
use crate::{GST_RATE_MAX_BPS, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in paise.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (freebie lines are priced at zero)
///
/// ## Example
/// ```rust
/// use vitaran_core::validation::validate_price_paise;
///
/// assert!(validate_price_paise(10099).is_ok());  // ₹100.99
/// assert!(validate_price_paise(0).is_ok());      // freebie
/// assert!(validate_price_paise(-100).is_err());
/// ```
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a GST rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Real slabs are 0-2800 (0% to 28%)
pub fn validate_gst_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > GST_RATE_MAX_BPS {
        return Err(ValidationError::OutOfRange {
            field: "gst_rate".to_string(),
            min: 0,
            max: GST_RATE_MAX_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an HSN code (tax classification).
///
/// ## Rules
/// - Must not be empty
/// - Must be 2 to 8 characters
/// - Digits only
///
/// ## Example
/// ```rust
/// use vitaran_core::validation::validate_hsn_code;
///
/// assert!(validate_hsn_code("3402").is_ok());
/// assert!(validate_hsn_code("34021990").is_ok());
/// assert!(validate_hsn_code("34-02").is_err());
/// assert!(validate_hsn_code("3").is_err());
/// ```
pub fn validate_hsn_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "hsn_code".to_string(),
        });
    }

    if code.len() < 2 {
        return Err(ValidationError::TooShort {
            field: "hsn_code".to_string(),
            min: 2,
        });
    }

    if code.len() > 8 {
        return Err(ValidationError::TooLong {
            field: "hsn_code".to_string(),
            max: 8,
        });
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn_code".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use vitaran_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Scheme Validators
// =============================================================================

/// Validates a scheme's structure before it enters a pool.
///
/// ## Rules
/// - Buy and get SKU ids must be present
/// - Buy and get quantities must be positive
/// - The activity window must not be inverted (start <= end)
///
/// A zero buy-quantity would make `remaining / buy_quantity` in the
/// allocator meaningless, so it is rejected here at the boundary.
pub fn validate_scheme(scheme: &Scheme) -> ValidationResult<()> {
    if scheme.buy_sku_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "buy_sku_id".to_string(),
        });
    }

    if scheme.get_sku_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "get_sku_id".to_string(),
        });
    }

    if scheme.buy_quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "buy_quantity".to_string(),
        });
    }

    if scheme.get_quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "get_quantity".to_string(),
        });
    }

    if scheme.start_date > scheme.end_date {
        return Err(ValidationError::InvalidWindow {
            start: scheme.start_date.to_string(),
            end: scheme.end_date.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
