//! # Domain Types
//!
//! Core domain types used throughout the Vitaran pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sku        │   │  Distributor    │   │     Store       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  wallet_paise   │   │  name           │       │
//! │  │  price_paise    │   │  credit_limit   │   │  wallet_paise   │       │
//! │  │  gst_rate_bps   │   │  tier/store ids │   └─────────────────┘       │
//! │  │  hsn_code       │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    GstRate      │   │   StockLevel    │   │    Location     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  quantity       │   │  Plant          │       │
//! │  │  1800 = 18%     │   │  reserved       │   │  Store(id)      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scheme types live in [`crate::schemes`]; they carry enough behavior
//! (scope gating, activity windows) to warrant their own module.
//!
//! Entity ids are UUID strings issued by the upstream API. The engine
//! validates them (see [`crate::validation`]) but never generates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// GST Rate
// =============================================================================

/// GST rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (the most common slab); 500/1200/2800 also occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstRate(u32);

impl GstRate {
    /// Creates a GST rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        GstRate(bps)
    }

    /// Creates a GST rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        GstRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero GST rate.
    #[inline]
    pub const fn zero() -> Self {
        GstRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::zero()
    }
}

// =============================================================================
// SKU
// =============================================================================

/// A stock keeping unit available for ordering.
///
/// Immutable once referenced by historical orders; price changes apply
/// prospectively only (the backend enforces this, the engine just reads
/// the snapshot it is given).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sku {
    /// Unique identifier (UUID string from the upstream API).
    pub id: String,

    /// Display name shown on order lines.
    pub name: String,

    /// Base unit price in paise. Tier overrides take precedence.
    pub price_paise: i64,

    /// GST rate in basis points (1800 = 18%).
    pub gst_rate_bps: u32,

    /// HSN code (tax classification, 2-8 digits).
    pub hsn_code: String,
}

impl Sku {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Returns the GST rate.
    #[inline]
    pub fn gst_rate(&self) -> GstRate {
        GstRate::from_bps(self.gst_rate_bps)
    }
}

// =============================================================================
// Price Tier
// =============================================================================

/// A named set of per-SKU price overrides assignable to a distributor.
///
/// The tier itself is just identity and naming; the overrides live in a
/// [`crate::pricing::TierPriceBook`] keyed by (tier, SKU).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceTier {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// A single (tier, SKU) price override row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TierPriceOverride {
    pub tier_id: String,
    pub sku_id: String,
    /// Override unit price in paise.
    pub price_paise: i64,
}

impl TierPriceOverride {
    /// Returns the override price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

// =============================================================================
// Distributor
// =============================================================================

/// A distributor who places orders.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Distributor {
    /// Unique identifier (UUID string).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Wallet balance in paise. Signed: may go negative.
    pub wallet_paise: i64,

    /// Credit limit in paise. Non-negative.
    pub credit_limit_paise: i64,

    /// Assigned price tier, if any. No tier means base prices apply.
    pub tier_id: Option<String>,

    /// Assigned store, if any. Absence implies plant-level supply.
    pub store_id: Option<String>,

    /// Gates whether distributor-scoped schemes apply to them at all.
    pub has_special_schemes: bool,
}

impl Distributor {
    /// Returns the wallet balance as Money.
    #[inline]
    pub fn wallet(&self) -> Money {
        Money::from_paise(self.wallet_paise)
    }

    /// Returns the credit limit as Money.
    #[inline]
    pub fn credit_limit(&self) -> Money {
        Money::from_paise(self.credit_limit_paise)
    }

    /// Total spendable funds: wallet plus credit line.
    #[inline]
    pub fn available_funds(&self) -> Money {
        self.wallet() + self.credit_limit()
    }

    /// The stock location this distributor is supplied from.
    pub fn source_location(&self) -> Location {
        match &self.store_id {
            Some(store_id) => Location::Store(store_id.clone()),
            None => Location::Plant,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// A store. Usually a stock location; also the buyer on internal
/// store-to-store transfer orders, paying from its own wallet.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Store {
    pub id: String,
    pub name: String,
    /// Wallet balance in paise. Stores have no credit line.
    pub wallet_paise: i64,
}

impl Store {
    /// Returns the wallet balance as Money.
    #[inline]
    pub fn wallet(&self) -> Money {
        Money::from_paise(self.wallet_paise)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Stock counters for one SKU at one location.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockLevel {
    /// Quantity on hand.
    pub quantity: i64,
    /// Quantity already reserved by pending commitments.
    pub reserved: i64,
}

impl StockLevel {
    /// Units actually available to a new order: on-hand minus reserved.
    ///
    /// Never treat raw `quantity` as sellable; reservations are other
    /// orders' units.
    #[inline]
    pub const fn available(&self) -> i64 {
        self.quantity - self.reserved
    }
}

/// A stock location: the central plant or a specific store.
///
/// The unit variant serializes as the string `"plant"`, which is the wire
/// sentinel the upstream API uses for plant-level stock rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Plant,
    Store(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Plant => write!(f, "plant"),
            Location::Store(id) => write!(f, "{}", id),
        }
    }
}

// =============================================================================
// GST Treatment
// =============================================================================

/// Whether GST applies to an order.
///
/// Distributor orders charge GST per line. Internal store-to-store
/// transfers do not; the subtotal alone is the total value of goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GstTreatment {
    Applied,
    Exempt,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gst_rate_from_bps() {
        let rate = GstRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_gst_rate_from_percentage() {
        assert_eq!(GstRate::from_percentage(18.0).bps(), 1800);
        assert_eq!(GstRate::from_percentage(0.25).bps(), 25);
    }

    #[test]
    fn test_stock_level_available() {
        let level = StockLevel {
            quantity: 100,
            reserved: 30,
        };
        assert_eq!(level.available(), 70);

        // Over-reserved location reads as negative availability
        let level = StockLevel {
            quantity: 10,
            reserved: 15,
        };
        assert_eq!(level.available(), -5);
    }

    #[test]
    fn test_distributor_available_funds() {
        let distributor = Distributor {
            id: "d1".to_string(),
            name: "Sharma Agencies".to_string(),
            wallet_paise: -10000,
            credit_limit_paise: 50000,
            tier_id: None,
            store_id: None,
            has_special_schemes: false,
        };
        // Negative wallet eats into the credit line
        assert_eq!(distributor.available_funds().paise(), 40000);
    }

    #[test]
    fn test_distributor_source_location() {
        let mut distributor = Distributor {
            id: "d1".to_string(),
            name: "Sharma Agencies".to_string(),
            wallet_paise: 0,
            credit_limit_paise: 0,
            tier_id: None,
            store_id: None,
            has_special_schemes: false,
        };
        assert_eq!(distributor.source_location(), Location::Plant);

        distributor.store_id = Some("s1".to_string());
        assert_eq!(
            distributor.source_location(),
            Location::Store("s1".to_string())
        );
    }

    #[test]
    fn test_location_serializes_plant_sentinel() {
        let json = serde_json::to_string(&Location::Plant).unwrap();
        assert_eq!(json, "\"plant\"");
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::Plant.to_string(), "plant");
        assert_eq!(Location::Store("s9".to_string()).to_string(), "s9");
    }
}
