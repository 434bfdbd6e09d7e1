//! # Price Resolution
//!
//! Layered price resolution: a distributor's tier override wins, the SKU
//! base price is the fallback.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Price Resolution Rule                             │
//! │                                                                         │
//! │  resolve_price(sku, tier?)                                             │
//! │       │                                                                 │
//! │       ├── SKU unknown? ──────────────► None (caller skips the line)    │
//! │       │                                                                 │
//! │       ├── tier assigned AND (tier, sku) override exists?               │
//! │       │        └────────────────────► override price, tier_price=true │
//! │       │                                                                 │
//! │       └── otherwise ─────────────────► base price, tier_price=false    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::money::Money;
use crate::types::{Sku, TierPriceOverride};

// =============================================================================
// Catalog
// =============================================================================

/// An immutable SKU lookup snapshot, keyed by SKU id.
///
/// Built once per screen-load from the SKU list the host fetched; the
/// engine never mutates or re-fetches it mid-computation.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    skus: BTreeMap<String, Sku>,
}

impl Catalog {
    /// Builds a catalog from a SKU list. Later duplicates win, matching
    /// last-write semantics of the upstream list endpoints.
    pub fn new(skus: impl IntoIterator<Item = Sku>) -> Self {
        Catalog {
            skus: skus.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    /// Looks up a SKU by id.
    pub fn get(&self, sku_id: &str) -> Option<&Sku> {
        self.skus.get(sku_id)
    }

    /// Number of SKUs in the snapshot.
    pub fn len(&self) -> usize {
        self.skus.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }
}

impl FromIterator<Sku> for Catalog {
    fn from_iter<I: IntoIterator<Item = Sku>>(iter: I) -> Self {
        Catalog::new(iter)
    }
}

// =============================================================================
// Tier Price Book
// =============================================================================

/// Tier price overrides: `tier id → (SKU id → override price in paise)`.
///
/// A tier with no override for a SKU falls back to that SKU's base price;
/// the book only stores the exceptions.
#[derive(Debug, Clone, Default)]
pub struct TierPriceBook {
    overrides: BTreeMap<String, BTreeMap<String, i64>>,
}

impl TierPriceBook {
    /// Builds the book from override rows.
    pub fn new(rows: impl IntoIterator<Item = TierPriceOverride>) -> Self {
        let mut overrides: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
        for row in rows {
            overrides
                .entry(row.tier_id)
                .or_default()
                .insert(row.sku_id, row.price_paise);
        }
        TierPriceBook { overrides }
    }

    /// An empty book: every SKU resolves to its base price.
    pub fn empty() -> Self {
        TierPriceBook::default()
    }

    /// Returns the override price for (tier, SKU), if one exists.
    pub fn override_for(&self, tier_id: &str, sku_id: &str) -> Option<Money> {
        self.overrides
            .get(tier_id)
            .and_then(|skus| skus.get(sku_id))
            .map(|paise| Money::from_paise(*paise))
    }
}

// =============================================================================
// Price Resolver
// =============================================================================

/// The effective unit price for one SKU on one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPrice {
    /// Effective unit price.
    pub unit_price: Money,
    /// True when a tier override supplied the price.
    pub tier_price: bool,
}

/// Resolves the effective unit price for a SKU.
///
/// Returns `None` when the SKU id is unknown; the caller drops the line
/// rather than failing the whole computation.
///
/// ## Example
/// ```rust
/// use vitaran_core::money::Money;
/// use vitaran_core::pricing::{resolve_price, Catalog, TierPriceBook};
/// use vitaran_core::types::{Sku, TierPriceOverride};
///
/// let catalog = Catalog::new([Sku {
///     id: "sku-a".to_string(),
///     name: "Detergent 1kg".to_string(),
///     price_paise: 10000,
///     gst_rate_bps: 1800,
///     hsn_code: "3402".to_string(),
/// }]);
/// let book = TierPriceBook::new([TierPriceOverride {
///     tier_id: "gold".to_string(),
///     sku_id: "sku-a".to_string(),
///     price_paise: 9500,
/// }]);
///
/// let gold = resolve_price(&catalog, &book, Some("gold"), "sku-a").unwrap();
/// assert_eq!(gold.unit_price, Money::from_paise(9500));
/// assert!(gold.tier_price);
///
/// let untiered = resolve_price(&catalog, &book, None, "sku-a").unwrap();
/// assert_eq!(untiered.unit_price, Money::from_paise(10000));
/// assert!(!untiered.tier_price);
/// ```
pub fn resolve_price(
    catalog: &Catalog,
    tiers: &TierPriceBook,
    tier_id: Option<&str>,
    sku_id: &str,
) -> Option<ResolvedPrice> {
    let Some(sku) = catalog.get(sku_id) else {
        debug!(sku_id, "unknown SKU in draft, dropping line");
        return None;
    };

    if let Some(tier_id) = tier_id {
        if let Some(price) = tiers.override_for(tier_id, sku_id) {
            return Some(ResolvedPrice {
                unit_price: price,
                tier_price: true,
            });
        }
    }

    Some(ResolvedPrice {
        unit_price: sku.price(),
        tier_price: false,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
