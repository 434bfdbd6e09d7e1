//! # Promotional Schemes
//!
//! "Buy X, get Y free" scheme model and the eligibility filter.
//!
//! ## Scope Gating
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scheme Eligibility Filter                            │
//! │                                                                         │
//! │  Pool            Gate                                                   │
//! │  ─────────────   ─────────────────────────────────────────────────      │
//! │  global          always a candidate                                    │
//! │  store-scoped    distributor's assigned store matches scheme's store   │
//! │  distributor-    distributor.has_special_schemes == true AND the       │
//! │  scoped          scheme targets this distributor's id                  │
//! │                                                                         │
//! │  Every candidate must also be ACTIVE on the as-of date, and the        │
//! │  result is deduplicated by scheme id (id is authoritative if a         │
//! │  scheme somehow appears in more than one pool).                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The as-of date is explicit
//! New-order quotes pass the host's wall-clock date; edit quotes pass the
//! order's own date so a historical order still sees the schemes that were
//! active when it was placed. The engine never reads the clock itself.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Distributor;

// =============================================================================
// Scheme
// =============================================================================

/// The scope a scheme applies at. Exactly one per scheme, by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SchemeScope {
    /// Applies to every distributor.
    Global,
    /// Applies to distributors assigned to this store.
    Store { store_id: String },
    /// Applies to this one distributor (if they have special schemes enabled).
    Distributor { distributor_id: String },
}

/// A "buy X, get Y free" promotional rule with an active date window.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Scheme {
    /// Unique identifier (UUID string). Authoritative for deduplication.
    pub id: String,

    /// Human-readable description, shown as the scheme-source label on
    /// freebie lines ("Buy 10 get 2 free").
    pub description: String,

    /// The SKU whose purchased quantity triggers the scheme.
    pub buy_sku_id: String,

    /// Threshold quantity of the buy-SKU per application.
    pub buy_quantity: i64,

    /// The SKU granted as a reward.
    pub get_sku_id: String,

    /// Reward units granted per application.
    pub get_quantity: i64,

    /// First day of the activity window (inclusive).
    #[ts(as = "String")]
    pub start_date: NaiveDate,

    /// Last day of the activity window (inclusive).
    #[ts(as = "String")]
    pub end_date: NaiveDate,

    /// Manual early termination. A stop excludes the scheme from any
    /// activity date on or after this day, overriding `end_date`.
    #[ts(as = "Option<String>")]
    pub stopped_on: Option<NaiveDate>,

    /// Who stopped the scheme (audit display only).
    pub stopped_by: Option<String>,

    /// Exactly one scope per scheme.
    pub scope: SchemeScope,
}

impl Scheme {
    /// Whether the scheme is active on the given date.
    ///
    /// Active means inside the inclusive `[start_date, end_date]` window
    /// and not stopped on or before that date. An edit replayed as of an
    /// order date that precedes a later stop still sees the scheme; a
    /// wall-clock check after the stop does not.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if date < self.start_date || date > self.end_date {
            return false;
        }
        match self.stopped_on {
            Some(stopped_on) => stopped_on > date,
            None => true,
        }
    }
}

// =============================================================================
// Scheme Pools
// =============================================================================

/// The three scope-partitioned scheme lists, as fetched by the host.
#[derive(Debug, Clone, Default)]
pub struct SchemePools {
    pub global: Vec<Scheme>,
    pub store: Vec<Scheme>,
    pub distributor: Vec<Scheme>,
}

impl SchemePools {
    pub fn new(global: Vec<Scheme>, store: Vec<Scheme>, distributor: Vec<Scheme>) -> Self {
        SchemePools {
            global,
            store,
            distributor,
        }
    }

    /// Pools with no schemes at all; allocation becomes a no-op.
    pub fn empty() -> Self {
        SchemePools::default()
    }

    /// Checks if every pool is empty.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.store.is_empty() && self.distributor.is_empty()
    }
}

// =============================================================================
// Eligibility Filter
// =============================================================================

/// Returns the active schemes applicable to this distributor on `as_of`,
/// deduplicated by scheme id, in pool order (global, store, distributor).
///
/// Each pool is additionally gated by its own scope tag, so a
/// mispartitioned scheme can never leak across scopes.
pub fn eligible_schemes<'a>(
    as_of: NaiveDate,
    pools: &'a SchemePools,
    distributor: &Distributor,
) -> Vec<&'a Scheme> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut eligible: Vec<&'a Scheme> = Vec::new();

    for scheme in &pools.global {
        if matches!(scheme.scope, SchemeScope::Global) {
            consider(scheme, as_of, &mut seen, &mut eligible);
        }
    }

    for scheme in &pools.store {
        if let SchemeScope::Store { store_id } = &scheme.scope {
            if distributor.store_id.as_deref() == Some(store_id.as_str()) {
                consider(scheme, as_of, &mut seen, &mut eligible);
            }
        }
    }

    if distributor.has_special_schemes {
        for scheme in &pools.distributor {
            if let SchemeScope::Distributor { distributor_id } = &scheme.scope {
                if *distributor_id == distributor.id {
                    consider(scheme, as_of, &mut seen, &mut eligible);
                }
            }
        }
    }

    eligible
}

fn consider<'a>(
    scheme: &'a Scheme,
    as_of: NaiveDate,
    seen: &mut BTreeSet<&'a str>,
    eligible: &mut Vec<&'a Scheme>,
) {
    if scheme.is_active_on(as_of) && seen.insert(scheme.id.as_str()) {
        eligible.push(scheme);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
