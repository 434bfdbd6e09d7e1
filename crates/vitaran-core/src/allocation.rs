//! # Freebie Allocation Engine
//!
//! Greedy allocation of free units from "buy X, get Y free" schemes.
//!
//! ## The Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Greedy Descending-Threshold Consumption                    │
//! │                                                                         │
//! │  1. Group active schemes by buy-SKU                                    │
//! │  2. Within each group, sort by buy_quantity DESCENDING                 │
//! │  3. For each buy-SKU with purchased quantity Q:                        │
//! │        remaining = Q                                                    │
//! │        for each scheme, largest threshold first:                       │
//! │            if remaining >= buy_quantity:                               │
//! │                times      = remaining / buy_quantity                   │
//! │                free units += times * get_quantity                      │
//! │                remaining   = remaining % buy_quantity                  │
//! │                                                                         │
//! │  Example: thresholds [50 → 5 free, 20 → 1 free], purchase 69          │
//! │    69 / 50 = 1 application, 5 free, remainder 19                       │
//! │    19 < 20 → the smaller scheme never fires                            │
//! │    Total: 5 free  (NOT 3 × the 20-threshold!)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This consumption order is business policy, reproduced exactly. It is not
//! reward-maximizing for the buyer: a smaller threshold applied first can
//! sometimes yield strictly more free units. Changing it would change real
//! order outcomes, so it stays as-is.
//!
//! Only PAID quantities feed the allocator. Freebies granted by one scheme
//! never count as "bought" toward triggering another.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::schemes::Scheme;

// =============================================================================
// Allocation Results
// =============================================================================

/// One scheme's contribution to an order: how many times it applied and
/// how many free units it granted.
///
/// Accumulates across buy groups in the (unlikely) case a scheme is
/// reachable from more than one group; in practice one buy-SKU per scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SchemeGrant {
    pub scheme_id: String,
    /// Scheme description, used as the scheme-source label on freebie lines.
    pub description: String,
    pub buy_sku_id: String,
    pub get_sku_id: String,
    pub times_applied: i64,
    /// Always `times_applied * get_quantity`: a non-negative integer
    /// multiple of the scheme's reward size.
    pub free_quantity: i64,
}

/// The full result of one allocation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FreebieAllocation {
    /// Grants in application order, one entry per scheme.
    pub grants: Vec<SchemeGrant>,
}

impl FreebieAllocation {
    /// Aggregate free units per reward SKU. Multiple schemes rewarding
    /// the same SKU sum here.
    pub fn free_units_by_sku(&self) -> BTreeMap<String, i64> {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for grant in &self.grants {
            *totals.entry(grant.get_sku_id.clone()).or_insert(0) += grant.free_quantity;
        }
        totals
    }

    /// Checks if no scheme applied.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

// =============================================================================
// Allocator
// =============================================================================

/// Allocates free units for the given paid quantities against the given
/// (already eligibility-filtered) schemes.
///
/// `purchased` maps SKU id to PAID quantity; entries with non-positive
/// quantities are ignored. Scheme order within equal buy thresholds is
/// preserved (stable sort), so pool order breaks ties deterministically.
pub fn allocate_freebies(
    purchased: &BTreeMap<String, i64>,
    schemes: &[&Scheme],
) -> FreebieAllocation {
    // 1. Group by buy-SKU
    let mut by_buy_sku: BTreeMap<&str, Vec<&Scheme>> = BTreeMap::new();
    for scheme in schemes {
        by_buy_sku
            .entry(scheme.buy_sku_id.as_str())
            .or_default()
            .push(scheme);
    }

    // 2. Largest threshold first within each group
    for group in by_buy_sku.values_mut() {
        group.sort_by(|a, b| b.buy_quantity.cmp(&a.buy_quantity));
    }

    // 3. Consume each buy-SKU's purchased quantity down the thresholds
    let mut grants: Vec<SchemeGrant> = Vec::new();
    for (buy_sku_id, &quantity) in purchased {
        if quantity <= 0 {
            continue;
        }
        let Some(group) = by_buy_sku.get(buy_sku_id.as_str()) else {
            continue;
        };

        let mut remaining = quantity;
        for scheme in group {
            if remaining < scheme.buy_quantity {
                continue;
            }
            let times = remaining / scheme.buy_quantity;
            let free = times * scheme.get_quantity;
            remaining %= scheme.buy_quantity;

            trace!(
                scheme_id = %scheme.id,
                buy_sku_id = %buy_sku_id,
                times,
                free,
                remaining,
                "scheme applied"
            );

            match grants.iter_mut().find(|g| g.scheme_id == scheme.id) {
                Some(grant) => {
                    grant.times_applied += times;
                    grant.free_quantity += free;
                }
                None => grants.push(SchemeGrant {
                    scheme_id: scheme.id.clone(),
                    description: scheme.description.clone(),
                    buy_sku_id: scheme.buy_sku_id.clone(),
                    get_sku_id: scheme.get_sku_id.clone(),
                    times_applied: times,
                    free_quantity: free,
                }),
            }
        }
    }

    FreebieAllocation { grants }
}

// =============================================================================
// Unit Tests
// =============================================================================
