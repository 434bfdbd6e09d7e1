//! # Order Quote Engine
//!
//! The single entry point both order flows call: place-order and
//! edit-order build an [`OrderContext`] from their fetched snapshots and
//! get back an [`OrderQuote`] to render.
//!
//! ## Quote Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Pipeline                                   │
//! │                                                                         │
//! │  OrderRequest ──► resolve prices ──► paid lines                        │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  eligible_schemes(as_of) ──► allocate_freebies ──► freebie lines       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  OrderTotals::compute ──► delta (edit) ──► check_stock / check_funds   │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   OrderQuote { lines, totals, issues, can_submit }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The quote is recomputed eagerly on every draft change and each result
//! fully supersedes the prior one. Everything here is a pure function of
//! the context snapshots: no clock reads, no I/O, no caching.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::allocation::{allocate_freebies, FreebieAllocation, SchemeGrant};
use crate::error::{EngineError, EngineResult};
use crate::feasibility::{
    check_funds, check_stock, FundsDecision, FundsSource, StockIssue, StockSnapshot,
};
use crate::money::Money;
use crate::pricing::{resolve_price, Catalog, TierPriceBook};
use crate::schemes::{eligible_schemes, SchemePools};
use crate::totals::{OrderLine, OrderTotals};
use crate::types::{Distributor, GstTreatment, Location, Store};
use crate::validation::validate_quantity;
use crate::MAX_ORDER_LINES;

// =============================================================================
// Buyer
// =============================================================================

/// Who the order is for. Decides pricing tier, scheme eligibility, GST
/// treatment, stock source, and the funds the order draws on.
#[derive(Debug, Clone, Copy)]
pub enum Buyer<'a> {
    /// A distributor placing a regular order.
    Distributor(&'a Distributor),
    /// A store receiving an internal stock transfer. No tier, no schemes,
    /// no GST; pays from the store wallet, supplied from the plant.
    StoreTransfer(&'a Store),
}

impl<'a> Buyer<'a> {
    /// The distributor, when there is one.
    pub fn distributor(&self) -> Option<&'a Distributor> {
        match self {
            Buyer::Distributor(d) => Some(d),
            Buyer::StoreTransfer(_) => None,
        }
    }

    /// The price tier the order resolves against.
    pub fn tier_id(&self) -> Option<&'a str> {
        self.distributor().and_then(|d| d.tier_id.as_deref())
    }

    /// GST applies to distributor orders only.
    pub fn gst_treatment(&self) -> GstTreatment {
        match self {
            Buyer::Distributor(_) => GstTreatment::Applied,
            Buyer::StoreTransfer(_) => GstTreatment::Exempt,
        }
    }

    /// The stock location the order is supplied from.
    pub fn source_location(&self) -> Location {
        match self {
            Buyer::Distributor(d) => d.source_location(),
            Buyer::StoreTransfer(_) => Location::Plant,
        }
    }

    fn funds_source(&self) -> FundsSource {
        match self {
            Buyer::Distributor(d) => FundsSource::for_distributor(d),
            Buyer::StoreTransfer(s) => FundsSource::for_store(s),
        }
    }
}

// =============================================================================
// Order Context
// =============================================================================

/// Immutable snapshot bundle for one quote. The host fetches these once
/// per screen-load; the engine never re-fetches mid-computation.
#[derive(Debug, Clone, Copy)]
pub struct OrderContext<'a> {
    pub catalog: &'a Catalog,
    pub tier_prices: &'a TierPriceBook,
    pub schemes: &'a SchemePools,
    pub stock: &'a StockSnapshot,
    pub buyer: Buyer<'a>,
    /// Scheme-activity date for new orders. The host passes its wall-clock
    /// date; the engine never reads the clock. Edit quotes override this
    /// with the order's own date from [`EditBaseline`].
    pub as_of: NaiveDate,
}

// =============================================================================
// Order Request
// =============================================================================

/// One requested draft line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItem {
    pub sku_id: String,
    pub quantity: i64,
}

/// A normalized draft: duplicate SKU lines merged, quantities validated.
///
/// An empty request is legal (the quote simply cannot be submitted); a
/// request with invalid quantities or too many lines is a host bug and is
/// rejected at construction.
#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    items: Vec<RequestedItem>,
}

impl OrderRequest {
    pub fn new(items: Vec<RequestedItem>) -> EngineResult<Self> {
        let mut merged: Vec<RequestedItem> = Vec::new();
        for item in items {
            validate_quantity(item.quantity)?;
            match merged.iter_mut().find(|m| m.sku_id == item.sku_id) {
                Some(existing) => {
                    existing.quantity += item.quantity;
                    validate_quantity(existing.quantity)?;
                }
                None => merged.push(item),
            }
        }

        if merged.len() > MAX_ORDER_LINES {
            return Err(EngineError::TooManyLines {
                max: MAX_ORDER_LINES,
            });
        }

        Ok(OrderRequest { items: merged })
    }

    /// The normalized draft lines, in first-seen order.
    pub fn items(&self) -> &[RequestedItem] {
        &self.items
    }

    /// Checks if the draft has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Edit Baseline
// =============================================================================

/// Snapshot of the order being edited, as originally persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EditBaseline {
    /// The order's own date. Scheme activity is re-evaluated as of this
    /// date, not the wall clock, so a historical order still sees the
    /// schemes that were active when it was placed.
    #[ts(as = "String")]
    pub order_date: NaiveDate,

    /// The persisted grand total, in paise.
    pub original_total_paise: i64,

    /// Paid quantities the order already holds, per SKU. These units are
    /// reserved against this same order, so the stock check adds them
    /// back to availability.
    pub original_quantities: BTreeMap<String, i64>,
}

impl EditBaseline {
    /// Returns the original grand total as Money.
    #[inline]
    pub fn original_total(&self) -> Money {
        Money::from_paise(self.original_total_paise)
    }
}

// =============================================================================
// Order Quote
// =============================================================================

/// Everything the host needs to render and act on one draft state.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuote {
    /// Paid lines in draft order, then freebie lines in grant order.
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
    /// Per-scheme application counts, for UI display and analytics.
    pub applied_schemes: Vec<SchemeGrant>,
    /// Stock shortfalls. Non-fatal, but block submission while present.
    pub stock_issues: Vec<StockIssue>,
    pub funds: FundsDecision,
    /// Edit quotes only: recalculated total minus the original total.
    pub delta_paise: Option<i64>,
    /// At least one paid line, positive grand total, no stock issues,
    /// and the funds decision passes.
    pub can_submit: bool,
}

impl OrderQuote {
    /// Returns the edit delta as Money, when this is an edit quote.
    pub fn delta(&self) -> Option<Money> {
        self.delta_paise.map(Money::from_paise)
    }

    /// The submission payload: paid lines only. The server recomputes
    /// and persists freebie lines itself; sending them would double-grant.
    pub fn submission_items(&self) -> Vec<SubmitItem> {
        self.lines
            .iter()
            .filter(|line| !line.freebie)
            .map(|line| SubmitItem {
                sku_id: line.sku_id.clone(),
                quantity: line.quantity,
            })
            .collect()
    }
}

/// One line of the submission payload handed to the persistence API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SubmitItem {
    pub sku_id: String,
    pub quantity: i64,
}

// =============================================================================
// Quote Entry Points
// =============================================================================

/// Quotes a new order. Scheme activity is evaluated as of `ctx.as_of`.
pub fn quote_order(ctx: &OrderContext<'_>, request: &OrderRequest) -> OrderQuote {
    build_quote(ctx, request, None)
}

/// Quotes an edit of an existing order. Scheme activity is evaluated as
/// of the order's own date; stock and funds checks apply the edit-mode
/// carve-out and delta rules.
pub fn quote_order_edit(
    ctx: &OrderContext<'_>,
    request: &OrderRequest,
    baseline: &EditBaseline,
) -> OrderQuote {
    build_quote(ctx, request, Some(baseline))
}

fn build_quote(
    ctx: &OrderContext<'_>,
    request: &OrderRequest,
    baseline: Option<&EditBaseline>,
) -> OrderQuote {
    let as_of = baseline.map_or(ctx.as_of, |b| b.order_date);
    debug!(
        draft_lines = request.items().len(),
        %as_of,
        edit = baseline.is_some(),
        "quoting order"
    );

    let expected_location = ctx.buyer.source_location();
    if *ctx.stock.location() != expected_location {
        warn!(
            snapshot = %ctx.stock.location(),
            expected = %expected_location,
            "stock snapshot location does not match the buyer's source"
        );
    }

    // Paid lines, with purchased quantities for the allocator
    let mut lines: Vec<OrderLine> = Vec::new();
    let mut purchased: BTreeMap<String, i64> = BTreeMap::new();
    for item in request.items() {
        let (Some(sku), Some(resolved)) = (
            ctx.catalog.get(&item.sku_id),
            resolve_price(ctx.catalog, ctx.tier_prices, ctx.buyer.tier_id(), &item.sku_id),
        ) else {
            continue;
        };

        lines.push(OrderLine {
            sku_id: sku.id.clone(),
            name: sku.name.clone(),
            quantity: item.quantity,
            unit_price_paise: resolved.unit_price.paise(),
            gst_rate_bps: sku.gst_rate_bps,
            freebie: false,
            tier_price: resolved.tier_price,
            scheme_label: None,
        });
        *purchased.entry(sku.id.clone()).or_insert(0) += item.quantity;
    }

    // Scheme allocation. Store transfers have no distributor, hence no
    // scheme eligibility at all.
    let allocation = match ctx.buyer.distributor() {
        Some(distributor) => {
            let schemes = eligible_schemes(as_of, ctx.schemes, distributor);
            allocate_freebies(&purchased, &schemes)
        }
        None => FreebieAllocation::default(),
    };

    for grant in &allocation.grants {
        let Some(sku) = ctx.catalog.get(&grant.get_sku_id) else {
            debug!(
                sku_id = %grant.get_sku_id,
                scheme_id = %grant.scheme_id,
                "reward SKU missing from catalog, dropping freebie line"
            );
            continue;
        };
        lines.push(OrderLine {
            sku_id: sku.id.clone(),
            name: sku.name.clone(),
            quantity: grant.free_quantity,
            unit_price_paise: 0,
            gst_rate_bps: sku.gst_rate_bps,
            freebie: true,
            tier_price: false,
            scheme_label: Some(grant.description.clone()),
        });
    }

    let totals = OrderTotals::compute(&lines, ctx.buyer.gst_treatment());
    let stock_issues = check_stock(&lines, ctx.stock, baseline.map(|b| &b.original_quantities));

    let delta = baseline.map(|b| totals.grand_total() - b.original_total());
    let charge = delta.unwrap_or_else(|| totals.grand_total());
    let funds = check_funds(&ctx.buyer.funds_source(), charge);

    let has_paid_line = lines.iter().any(|line| !line.freebie);
    let can_submit = has_paid_line
        && totals.grand_total().is_positive()
        && stock_issues.is_empty()
        && funds.passes();

    debug!(
        subtotal = %totals.subtotal(),
        gst = %totals.gst_amount(),
        grand_total = %totals.grand_total(),
        stock_issues = stock_issues.len(),
        can_submit,
        "quote complete"
    );

    OrderQuote {
        lines,
        totals,
        applied_schemes: allocation.grants,
        stock_issues,
        funds,
        delta_paise: delta.map(|d| d.paise()),
        can_submit,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility::FundsStatus;
    use crate::schemes::{Scheme, SchemeScope};
    use crate::types::{Sku, StockLevel, TierPriceOverride};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sku(id: &str, name: &str, price_paise: i64, gst_bps: u32) -> Sku {
        Sku {
            id: id.to_string(),
            name: name.to_string(),
            price_paise,
            gst_rate_bps: gst_bps,
            hsn_code: "3402".to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new([
            sku("sku-a", "Detergent 1kg", 10000, 1800),
            sku("sku-b", "Detergent 200g", 2500, 1800),
        ])
    }

    fn global_scheme() -> Scheme {
        Scheme {
            id: "sch-1".to_string(),
            description: "Buy 10 get 2 free".to_string(),
            buy_sku_id: "sku-a".to_string(),
            buy_quantity: 10,
            get_sku_id: "sku-b".to_string(),
            get_quantity: 2,
            start_date: date(2026, 1, 1),
            end_date: date(2026, 12, 31),
            stopped_on: None,
            stopped_by: None,
            scope: SchemeScope::Global,
        }
    }

    fn distributor(wallet_paise: i64, credit_paise: i64) -> Distributor {
        Distributor {
            id: "d1".to_string(),
            name: "Sharma Agencies".to_string(),
            wallet_paise,
            credit_limit_paise: credit_paise,
            tier_id: None,
            store_id: None,
            has_special_schemes: false,
        }
    }

    fn plant_stock(entries: &[(&str, i64)]) -> StockSnapshot {
        StockSnapshot::new(
            Location::Plant,
            entries
                .iter()
                .map(|(sku, qty)| {
                    (
                        sku.to_string(),
                        StockLevel {
                            quantity: *qty,
                            reserved: 0,
                        },
                    )
                })
                .collect(),
        )
    }

    fn request(items: &[(&str, i64)]) -> OrderRequest {
        OrderRequest::new(
            items
                .iter()
                .map(|(sku, qty)| RequestedItem {
                    sku_id: sku.to_string(),
                    quantity: *qty,
                })
                .collect(),
        )
        .unwrap()
    }

    struct Fixture {
        catalog: Catalog,
        tier_prices: TierPriceBook,
        schemes: SchemePools,
        stock: StockSnapshot,
        distributor: Distributor,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                catalog: catalog(),
                tier_prices: TierPriceBook::empty(),
                schemes: SchemePools::new(vec![global_scheme()], vec![], vec![]),
                stock: plant_stock(&[("sku-a", 1000), ("sku-b", 1000)]),
                distributor: distributor(1_000_000, 0),
            }
        }

        fn ctx(&self) -> OrderContext<'_> {
            OrderContext {
                catalog: &self.catalog,
                tier_prices: &self.tier_prices,
                schemes: &self.schemes,
                stock: &self.stock,
                buyer: Buyer::Distributor(&self.distributor),
                as_of: date(2026, 6, 1),
            }
        }
    }

    #[test]
    fn test_reference_scenario() {
        // SKU A ₹100, GST 18%, no tier, global "buy 10 A get 2 B free".
        // Order 10×A: subtotal ₹1000, GST ₹180, grand ₹1180, 2×B free.
        let fixture = Fixture::new();
        let quote = quote_order(&fixture.ctx(), &request(&[("sku-a", 10)]));

        assert_eq!(quote.totals.subtotal_paise, 100000);
        assert_eq!(quote.totals.gst_paise, 18000);
        assert_eq!(quote.totals.grand_total_paise, 118000);

        assert_eq!(quote.lines.len(), 2);
        let freebie = &quote.lines[1];
        assert!(freebie.freebie);
        assert_eq!(freebie.sku_id, "sku-b");
        assert_eq!(freebie.quantity, 2);
        assert_eq!(freebie.unit_price_paise, 0);
        assert_eq!(freebie.scheme_label.as_deref(), Some("Buy 10 get 2 free"));

        assert_eq!(quote.applied_schemes.len(), 1);
        assert_eq!(quote.applied_schemes[0].scheme_id, "sch-1");
        assert_eq!(quote.applied_schemes[0].times_applied, 1);

        assert!(quote.stock_issues.is_empty());
        assert_eq!(quote.funds.status, FundsStatus::Covered);
        assert!(quote.can_submit);
        assert!(quote.delta_paise.is_none());
    }

    #[test]
    fn test_insufficient_funds_blocks_submission() {
        // Wallet ₹500 + credit ₹400 = ₹900 < ₹1180
        let mut fixture = Fixture::new();
        fixture.distributor = distributor(50000, 40000);
        let quote = quote_order(&fixture.ctx(), &request(&[("sku-a", 10)]));

        assert_eq!(quote.funds.status, FundsStatus::Insufficient);
        assert!(!quote.can_submit);
    }

    #[test]
    fn test_unknown_sku_line_skipped() {
        let fixture = Fixture::new();
        let quote = quote_order(&fixture.ctx(), &request(&[("sku-a", 5), ("ghost", 3)]));

        assert_eq!(quote.lines.len(), 1);
        assert_eq!(quote.totals.subtotal_paise, 50000);
        assert!(quote.can_submit);
    }

    #[test]
    fn test_tier_override_flags_line() {
        let mut fixture = Fixture::new();
        fixture.distributor.tier_id = Some("gold".to_string());
        fixture.tier_prices = TierPriceBook::new([TierPriceOverride {
            tier_id: "gold".to_string(),
            sku_id: "sku-a".to_string(),
            price_paise: 9500,
        }]);

        let quote = quote_order(&fixture.ctx(), &request(&[("sku-a", 10)]));
        assert!(quote.lines[0].tier_price);
        assert_eq!(quote.lines[0].unit_price_paise, 9500);
        assert_eq!(quote.totals.subtotal_paise, 95000);
    }

    #[test]
    fn test_stock_issue_blocks_submission() {
        let mut fixture = Fixture::new();
        fixture.stock = plant_stock(&[("sku-a", 1000), ("sku-b", 1)]);
        // 10×A grants 2×B free but only 1 B is available
        let quote = quote_order(&fixture.ctx(), &request(&[("sku-a", 10)]));

        assert_eq!(quote.stock_issues.len(), 1);
        assert_eq!(quote.stock_issues[0].sku_id, "sku-b");
        assert!(!quote.can_submit);
    }

    #[test]
    fn test_empty_request_cannot_submit() {
        let fixture = Fixture::new();
        let quote = quote_order(&fixture.ctx(), &OrderRequest::default());
        assert!(!quote.can_submit);
        assert_eq!(quote.totals.grand_total_paise, 0);
    }

    fn baseline(total_paise: i64, quantities: &[(&str, i64)]) -> EditBaseline {
        EditBaseline {
            order_date: date(2026, 5, 10),
            original_total_paise: total_paise,
            original_quantities: quantities
                .iter()
                .map(|(sku, qty)| (sku.to_string(), *qty))
                .collect(),
        }
    }

    #[test]
    fn test_edit_carve_out_allows_keeping_own_units() {
        // Order already holds 10×A; current stock shows 0 available.
        // Keeping it at 10 must not flag a stock issue.
        let mut fixture = Fixture::new();
        fixture.schemes = SchemePools::empty();
        fixture.stock = plant_stock(&[("sku-a", 0)]);

        let quote = quote_order_edit(
            &fixture.ctx(),
            &request(&[("sku-a", 10)]),
            &baseline(118000, &[("sku-a", 10)]),
        );
        assert!(quote.stock_issues.is_empty());

        // Raising to 11 exceeds the carve-out
        let quote = quote_order_edit(
            &fixture.ctx(),
            &request(&[("sku-a", 11)]),
            &baseline(118000, &[("sku-a", 10)]),
        );
        assert_eq!(quote.stock_issues.len(), 1);
    }

    #[test]
    fn test_edit_negative_delta_never_blocks_on_funds() {
        let mut fixture = Fixture::new();
        fixture.schemes = SchemePools::empty();
        // Deeply negative wallet and no credit
        fixture.distributor = distributor(-10_000_000, 0);

        // Original total ₹2360, reduced draft totals ₹1180: delta < 0
        let quote = quote_order_edit(
            &fixture.ctx(),
            &request(&[("sku-a", 10)]),
            &baseline(236000, &[("sku-a", 20)]),
        );

        assert_eq!(quote.delta_paise, Some(-118000));
        assert_eq!(quote.delta(), Some(Money::from_paise(-118000)));
        assert_eq!(quote.funds.status, FundsStatus::Covered);
        assert!(quote.can_submit);
    }

    #[test]
    fn test_edit_positive_delta_checked_against_funds() {
        let mut fixture = Fixture::new();
        fixture.schemes = SchemePools::empty();
        fixture.distributor = distributor(50000, 0);

        // Original ₹1180, draft ₹2360: delta ₹1180 > wallet ₹500
        let quote = quote_order_edit(
            &fixture.ctx(),
            &request(&[("sku-a", 20)]),
            &baseline(118000, &[("sku-a", 10)]),
        );

        assert_eq!(quote.delta_paise, Some(118000));
        assert_eq!(quote.funds.status, FundsStatus::Insufficient);
        assert!(!quote.can_submit);
    }

    #[test]
    fn test_edit_credit_draw_needs_confirmation() {
        let mut fixture = Fixture::new();
        fixture.schemes = SchemePools::empty();
        fixture.distributor = distributor(50000, 100000);

        let quote = quote_order_edit(
            &fixture.ctx(),
            &request(&[("sku-a", 20)]),
            &baseline(118000, &[("sku-a", 10)]),
        );

        assert_eq!(quote.funds.status, FundsStatus::CoveredWithCredit);
        assert!(quote.funds.needs_credit_confirmation());
        assert_eq!(quote.funds.credit_used_paise, 68000);
        assert!(quote.can_submit);
    }

    #[test]
    fn test_edit_replays_schemes_as_of_order_date() {
        let mut fixture = Fixture::new();
        // Scheme was stopped June 1st; the order is dated May 10th
        fixture.schemes.global[0].stopped_on = Some(date(2026, 6, 1));
        fixture.schemes.global[0].stopped_by = Some("ops".to_string());

        // A new order quoted June 1st sees no scheme
        let new_quote = quote_order(&fixture.ctx(), &request(&[("sku-a", 10)]));
        assert!(new_quote.applied_schemes.is_empty());

        // The edit replays as of May 10th and still sees it
        let edit_quote = quote_order_edit(
            &fixture.ctx(),
            &request(&[("sku-a", 10)]),
            &baseline(118000, &[("sku-a", 10)]),
        );
        assert_eq!(edit_quote.applied_schemes.len(), 1);
    }

    #[test]
    fn test_store_transfer_is_gst_exempt_and_scheme_free() {
        let fixture = Fixture::new();
        let store = Store {
            id: "store-1".to_string(),
            name: "Indore Depot".to_string(),
            wallet_paise: 10_000_000,
        };
        let ctx = OrderContext {
            buyer: Buyer::StoreTransfer(&store),
            ..fixture.ctx()
        };

        let quote = quote_order(&ctx, &request(&[("sku-a", 10)]));

        assert_eq!(quote.totals.subtotal_paise, 100000);
        assert_eq!(quote.totals.gst_paise, 0);
        assert_eq!(quote.totals.grand_total_paise, 100000);
        assert!(quote.applied_schemes.is_empty());
        assert_eq!(quote.lines.len(), 1);
        assert!(quote.can_submit);
    }

    #[test]
    fn test_store_transfer_funds_use_store_wallet() {
        let fixture = Fixture::new();
        let store = Store {
            id: "store-1".to_string(),
            name: "Indore Depot".to_string(),
            wallet_paise: 50000,
        };
        let ctx = OrderContext {
            buyer: Buyer::StoreTransfer(&store),
            ..fixture.ctx()
        };

        // ₹1000 transfer against a ₹500 wallet, no credit line
        let quote = quote_order(&ctx, &request(&[("sku-a", 10)]));
        assert_eq!(quote.funds.status, FundsStatus::Insufficient);
        assert!(!quote.can_submit);
    }

    #[test]
    fn test_request_merges_duplicate_lines() {
        let merged = request(&[("sku-a", 5), ("sku-b", 1), ("sku-a", 3)]);
        assert!(!merged.is_empty());
        assert_eq!(merged.items().len(), 2);
        assert_eq!(merged.items()[0].sku_id, "sku-a");
        assert_eq!(merged.items()[0].quantity, 8);
    }

    #[test]
    fn test_request_rejects_invalid_quantity() {
        let result = OrderRequest::new(vec![RequestedItem {
            sku_id: "sku-a".to_string(),
            quantity: 0,
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_rejects_too_many_lines() {
        let items = (0..=MAX_ORDER_LINES)
            .map(|i| RequestedItem {
                sku_id: format!("sku-{}", i),
                quantity: 1,
            })
            .collect();
        assert!(matches!(
            OrderRequest::new(items),
            Err(EngineError::TooManyLines { .. })
        ));
    }

    #[test]
    fn test_submission_payload_excludes_freebies() {
        let fixture = Fixture::new();
        let quote = quote_order(&fixture.ctx(), &request(&[("sku-a", 10)]));

        let payload = quote.submission_items();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].sku_id, "sku-a");
        assert_eq!(payload[0].quantity, 10);

        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"[{"skuId":"sku-a","quantity":10}]"#);
    }

    #[test]
    fn test_grand_total_round_trip_holds_on_quotes() {
        let fixture = Fixture::new();
        let quote = quote_order(&fixture.ctx(), &request(&[("sku-a", 7), ("sku-b", 13)]));
        assert_eq!(
            quote.totals.grand_total_paise,
            quote.totals.subtotal_paise + quote.totals.gst_paise
        );
    }
}
