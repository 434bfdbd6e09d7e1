//! # Feasibility Gate
//!
//! Stock-sufficiency and affordability checks for a quoted order.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Feasibility Checks                               │
//! │                                                                         │
//! │  STOCK   required(sku) = paid qty + free qty, summed over all lines    │
//! │          available     = on-hand − reserved at the source location     │
//! │          edit mode     = available + quantity already in THIS order    │
//! │                          (those units are reserved against the same    │
//! │                           order; they are not someone else's)          │
//! │                                                                         │
//! │  FUNDS   new order     charge = grand total                            │
//! │          edit          charge = delta (new total − original total)    │
//! │          charge ≤ 0            → covered, no check needed              │
//! │          charge ≤ wallet       → covered                               │
//! │          charge ≤ wallet+credit → covered, credit draw to confirm      │
//! │          otherwise             → insufficient                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both checks produce DATA, never errors: the host disables submission
//! while issues exist. They are advisory previews; the API service is the
//! sole admission arbiter and may still reject on a stale snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::totals::OrderLine;
use crate::types::{Distributor, Location, StockLevel, Store};

// =============================================================================
// Stock Snapshot
// =============================================================================

/// Stock levels for one location, keyed by SKU id. Fetched once per
/// screen-load; the engine never refreshes it mid-computation.
#[derive(Debug, Clone)]
pub struct StockSnapshot {
    location: Location,
    levels: BTreeMap<String, StockLevel>,
}

impl StockSnapshot {
    pub fn new(location: Location, levels: BTreeMap<String, StockLevel>) -> Self {
        StockSnapshot { location, levels }
    }

    /// The location this snapshot was taken at.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Available units for a SKU: on-hand minus reserved. A SKU with no
    /// stock row reads as zero available.
    pub fn available(&self, sku_id: &str) -> i64 {
        self.levels.get(sku_id).map_or(0, |level| level.available())
    }
}

// =============================================================================
// Stock Issues
// =============================================================================

/// One SKU whose required quantity exceeds what the source location can
/// supply. Non-fatal: surfaced as a blocking UI warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockIssue {
    pub sku_id: String,
    pub name: String,
    pub required: i64,
    /// Effective availability, including the edit-mode carve-out.
    pub available: i64,
}

impl fmt::Display for StockIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: required {}, available {}",
            self.name, self.required, self.available
        )
    }
}

/// Checks every SKU on the order (paid + free) against the stock snapshot.
///
/// `prior_quantities` is the edit-mode carve-out: the quantities the order
/// being edited already holds, added back to availability so an unchanged
/// order never flags its own reserved units as missing.
pub fn check_stock(
    lines: &[OrderLine],
    stock: &StockSnapshot,
    prior_quantities: Option<&BTreeMap<String, i64>>,
) -> Vec<StockIssue> {
    // Total required per SKU across paid and freebie lines
    let mut required: BTreeMap<&str, (i64, &str)> = BTreeMap::new();
    for line in lines {
        let entry = required
            .entry(line.sku_id.as_str())
            .or_insert((0, line.name.as_str()));
        entry.0 += line.quantity;
    }

    let mut issues = Vec::new();
    for (sku_id, (needed, name)) in required {
        let carve_out = prior_quantities
            .and_then(|prior| prior.get(sku_id))
            .copied()
            .unwrap_or(0);
        let available = stock.available(sku_id) + carve_out;

        if needed > available {
            debug!(
                sku_id,
                needed,
                available,
                location = %stock.location(),
                "stock shortfall"
            );
            issues.push(StockIssue {
                sku_id: sku_id.to_string(),
                name: name.to_string(),
                required: needed,
                available,
            });
        }
    }

    issues
}

// =============================================================================
// Funds
// =============================================================================

/// The funds a buyer can draw on for one order.
#[derive(Debug, Clone, Copy)]
pub struct FundsSource {
    pub wallet_paise: i64,
    pub credit_limit_paise: i64,
}

impl FundsSource {
    /// A distributor pays from wallet plus credit line.
    pub fn for_distributor(distributor: &Distributor) -> Self {
        FundsSource {
            wallet_paise: distributor.wallet_paise,
            credit_limit_paise: distributor.credit_limit_paise,
        }
    }

    /// A store pays from its wallet alone; stores have no credit line.
    pub fn for_store(store: &Store) -> Self {
        FundsSource {
            wallet_paise: store.wallet_paise,
            credit_limit_paise: 0,
        }
    }

    /// Returns the wallet balance as Money.
    #[inline]
    pub fn wallet(&self) -> Money {
        Money::from_paise(self.wallet_paise)
    }

    /// Total spendable funds: wallet plus credit.
    #[inline]
    pub fn available(&self) -> Money {
        Money::from_paise(self.wallet_paise + self.credit_limit_paise)
    }
}

/// Outcome of the affordability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FundsStatus {
    /// The wallet covers the charge (or there is nothing to charge).
    Covered,
    /// Covered only by drawing on credit; the host must ask the user to
    /// confirm the draw before submitting.
    CoveredWithCredit,
    /// Wallet plus credit cannot cover the charge. Blocks submission.
    Insufficient,
}

/// The affordability decision with its figures, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FundsDecision {
    pub status: FundsStatus,
    /// The charge this decision was made for (grand total, or edit delta).
    pub charge_paise: i64,
    /// Wallet plus credit at decision time.
    pub available_paise: i64,
    /// Portion of the charge drawn from credit. Zero unless status is
    /// `CoveredWithCredit`.
    pub credit_used_paise: i64,
}

impl FundsDecision {
    /// Whether this decision permits submission.
    #[inline]
    pub fn passes(&self) -> bool {
        self.status != FundsStatus::Insufficient
    }

    /// Whether the host must collect an explicit credit-draw confirmation.
    #[inline]
    pub fn needs_credit_confirmation(&self) -> bool {
        self.status == FundsStatus::CoveredWithCredit
    }
}

/// Checks a charge against a funds source.
///
/// A non-positive charge always passes: reducing an order never needs a
/// funds re-check. The wallet may already be negative; any part of the
/// charge the wallet cannot absorb is counted as a credit draw.
pub fn check_funds(source: &FundsSource, charge: Money) -> FundsDecision {
    let available = source.available();

    if !charge.is_positive() {
        return FundsDecision {
            status: FundsStatus::Covered,
            charge_paise: charge.paise(),
            available_paise: available.paise(),
            credit_used_paise: 0,
        };
    }

    let status = if charge <= source.wallet() {
        FundsStatus::Covered
    } else if charge <= available {
        FundsStatus::CoveredWithCredit
    } else {
        debug!(
            charge = %charge,
            available = %available,
            "insufficient funds"
        );
        FundsStatus::Insufficient
    };

    let credit_used = if status == FundsStatus::CoveredWithCredit {
        (charge - source.wallet()).paise()
    } else {
        0
    };

    FundsDecision {
        status,
        charge_paise: charge.paise(),
        available_paise: available.paise(),
        credit_used_paise: credit_used,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
