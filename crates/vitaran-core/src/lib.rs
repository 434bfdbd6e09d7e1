//! # vitaran-core: Pure Pricing Engine for Vitaran DMS
//!
//! This crate is the **heart** of Vitaran DMS. It contains the order
//! pricing and promotional-scheme resolution logic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Vitaran DMS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Admin SPA (React)                              │   │
//! │  │   Place Order ──► Edit Order ──► Sales Analytics               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON + generated TS types              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vitaran-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌─────────────────┐   │   │
//! │  │  │ pricing │ │ schemes │ │ allocation │ │   feasibility   │   │   │
//! │  │  │  tiers  │ │  scope  │ │   greedy   │ │  stock + funds  │   │   │
//! │  │  └─────────┘ └─────────┘ └────────────┘ └─────────────────┘   │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌─────────────────┐   │   │
//! │  │  │  money  │ │  totals │ │   engine   │ │    analytics    │   │   │
//! │  │  └─────────┘ └─────────┘ └────────────┘ └─────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              API service (authoritative)                        │   │
//! │  │        re-validates, persists, resolves stock races             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sku, Distributor, Store, stock, GST)
//! - [`money`] - Money type with integer paise arithmetic (no floats!)
//! - [`error`] - Engine error types
//! - [`validation`] - Boundary validation rules
//! - [`pricing`] - Tier-override price resolution
//! - [`schemes`] - Scheme model and scope/date eligibility
//! - [`allocation`] - Greedy buy-X-get-Y freebie allocation
//! - [`totals`] - Display lines and subtotal/GST/grand-total
//! - [`feasibility`] - Stock and funds checks (signalled as data)
//! - [`engine`] - The quote orchestrator both order flows call
//! - [`analytics`] - Scheme participation replay over settled orders
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshots + same draft = same quote
//! 2. **No I/O**: database, network, clock reads are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paise (i64), GST rounds
//!    half-up at the paisa, exactly once
//! 4. **Advisory, not authoritative**: feasibility results gate the UI;
//!    the API service remains the single point of admission
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use chrono::NaiveDate;
//! use vitaran_core::{
//!     quote_order, Buyer, Catalog, Distributor, Location, OrderContext, OrderRequest,
//!     RequestedItem, SchemePools, Sku, StockLevel, StockSnapshot, TierPriceBook,
//! };
//!
//! let catalog = Catalog::new([Sku {
//!     id: "sku-a".to_string(),
//!     name: "Detergent 1kg".to_string(),
//!     price_paise: 10000, // ₹100.00
//!     gst_rate_bps: 1800, // 18%
//!     hsn_code: "3402".to_string(),
//! }]);
//! let tier_prices = TierPriceBook::empty();
//! let schemes = SchemePools::empty();
//! let stock = StockSnapshot::new(
//!     Location::Plant,
//!     BTreeMap::from([("sku-a".to_string(), StockLevel { quantity: 100, reserved: 0 })]),
//! );
//! let distributor = Distributor {
//!     id: "d1".to_string(),
//!     name: "Sharma Agencies".to_string(),
//!     wallet_paise: 1_000_000,
//!     credit_limit_paise: 0,
//!     tier_id: None,
//!     store_id: None,
//!     has_special_schemes: false,
//! };
//!
//! let ctx = OrderContext {
//!     catalog: &catalog,
//!     tier_prices: &tier_prices,
//!     schemes: &schemes,
//!     stock: &stock,
//!     buyer: Buyer::Distributor(&distributor),
//!     as_of: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
//! };
//! let request = OrderRequest::new(vec![RequestedItem {
//!     sku_id: "sku-a".to_string(),
//!     quantity: 10,
//! }])
//! .unwrap();
//!
//! let quote = quote_order(&ctx, &request);
//! assert_eq!(quote.totals.subtotal_paise, 100_000);
//! assert_eq!(quote.totals.gst_paise, 18_000);
//! assert_eq!(quote.totals.grand_total_paise, 118_000);
//! assert!(quote.can_submit);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod analytics;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod money;
pub mod pricing;
pub mod schemes;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vitaran_core::Money` instead of
// `use vitaran_core::money::Money`

pub use allocation::{allocate_freebies, FreebieAllocation, SchemeGrant};
pub use analytics::{participation_report, ParticipationReport, SettledOrder, SkuMovement};
pub use engine::{
    quote_order, quote_order_edit, Buyer, EditBaseline, OrderContext, OrderQuote, OrderRequest,
    RequestedItem, SubmitItem,
};
pub use error::{EngineError, EngineResult, ValidationError};
pub use feasibility::{
    check_funds, check_stock, FundsDecision, FundsSource, FundsStatus, StockIssue, StockSnapshot,
};
pub use money::Money;
pub use pricing::{resolve_price, Catalog, ResolvedPrice, TierPriceBook};
pub use schemes::{eligible_schemes, Scheme, SchemePools, SchemeScope};
pub use totals::{OrderLine, OrderTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum draft lines in a single order.
///
/// ## Business Reason
/// Prevents runaway drafts and keeps quote recomputation cheap enough to
/// run on every keystroke. Can be made configurable per-tenant later.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity on a single order line.
///
/// ## Business Reason
/// Catches fat-finger quantities (e.g. 50000 instead of 50) before they
/// reach the feasibility checks. Distributor orders run larger than
/// retail carts, so the ceiling is generous.
pub const MAX_LINE_QUANTITY: i64 = 9_999;

/// Upper bound for GST rates, in basis points (100%).
pub const GST_RATE_MAX_BPS: u32 = 10_000;
