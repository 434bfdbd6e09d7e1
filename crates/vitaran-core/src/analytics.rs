//! # Scheme Participation Analytics
//!
//! The sales-analytics "scheme participation" signal, computed by
//! replaying the same eligibility filter and freebie allocator the order
//! flows use over settled historical orders. No hand-rolled duplicate of
//! the allocation loop lives here.
//!
//! Each order is replayed as of its own date, so the report reflects the
//! schemes that were active when the order was placed, not the schemes
//! active today.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::allocation::allocate_freebies;
use crate::engine::SubmitItem;
use crate::schemes::{eligible_schemes, SchemePools};
use crate::types::Distributor;

// =============================================================================
// Inputs
// =============================================================================

/// A historical order as persisted: paid lines only, the server's freebie
/// lines are recomputed by the replay.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettledOrder {
    pub distributor_id: String,
    #[ts(as = "String")]
    pub order_date: NaiveDate,
    pub items: Vec<SubmitItem>,
}

// =============================================================================
// Report
// =============================================================================

/// Paid and free unit movement for one (distributor, SKU) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SkuMovement {
    pub paid: i64,
    pub free: i64,
}

/// Accumulated participation for one scheme across the replayed orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SchemeParticipation {
    pub scheme_id: String,
    pub description: String,
    /// Distinct distributors the scheme fired for, in first-seen order.
    pub distributor_ids: Vec<String>,
    /// Orders the scheme fired on.
    pub orders_applied: i64,
    /// Total applications across all orders.
    pub times_applied: i64,
    /// Total free units granted across all orders.
    pub free_units: i64,
}

/// The full participation report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationReport {
    /// Per-scheme accumulation, keyed by scheme id.
    pub schemes: BTreeMap<String, SchemeParticipation>,
    /// Movement matrix: distributor id → (SKU id → paid/free units).
    pub movements: BTreeMap<String, BTreeMap<String, SkuMovement>>,
}

// =============================================================================
// Replay
// =============================================================================

/// Replays eligibility and allocation over settled orders.
///
/// Orders referencing a distributor absent from the snapshot are skipped,
/// consistent with the engine's drop-don't-fail posture on missing
/// reference data.
pub fn participation_report(
    orders: &[SettledOrder],
    pools: &SchemePools,
    distributors: &BTreeMap<String, Distributor>,
) -> ParticipationReport {
    let mut report = ParticipationReport::default();

    for order in orders {
        let Some(distributor) = distributors.get(&order.distributor_id) else {
            debug!(
                distributor_id = %order.distributor_id,
                "unknown distributor on settled order, skipping"
            );
            continue;
        };

        // Paid quantities, merged per SKU like the order flows do
        let mut purchased: BTreeMap<String, i64> = BTreeMap::new();
        for item in &order.items {
            *purchased.entry(item.sku_id.clone()).or_insert(0) += item.quantity;
        }

        let movement_row = report.movements.entry(distributor.id.clone()).or_default();
        for (sku_id, quantity) in &purchased {
            movement_row.entry(sku_id.clone()).or_default().paid += *quantity;
        }

        let schemes = eligible_schemes(order.order_date, pools, distributor);
        let allocation = allocate_freebies(&purchased, &schemes);

        for grant in &allocation.grants {
            let movement_row = report.movements.entry(distributor.id.clone()).or_default();
            movement_row
                .entry(grant.get_sku_id.clone())
                .or_default()
                .free += grant.free_quantity;

            let entry = report
                .schemes
                .entry(grant.scheme_id.clone())
                .or_insert_with(|| SchemeParticipation {
                    scheme_id: grant.scheme_id.clone(),
                    description: grant.description.clone(),
                    distributor_ids: Vec::new(),
                    orders_applied: 0,
                    times_applied: 0,
                    free_units: 0,
                });
            entry.orders_applied += 1;
            entry.times_applied += grant.times_applied;
            entry.free_units += grant.free_quantity;
            if !entry.distributor_ids.contains(&distributor.id) {
                entry.distributor_ids.push(distributor.id.clone());
            }
        }
    }

    report
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemes::{Scheme, SchemeScope};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scheme(id: &str, buy_sku: &str, buy_qty: i64, get_sku: &str, get_qty: i64) -> Scheme {
        Scheme {
            id: id.to_string(),
            description: format!("Buy {} get {}", buy_qty, get_qty),
            buy_sku_id: buy_sku.to_string(),
            buy_quantity: buy_qty,
            get_sku_id: get_sku.to_string(),
            get_quantity: get_qty,
            start_date: date(2026, 1, 1),
            end_date: date(2026, 12, 31),
            stopped_on: None,
            stopped_by: None,
            scope: SchemeScope::Global,
        }
    }

    fn distributor(id: &str) -> Distributor {
        Distributor {
            id: id.to_string(),
            name: format!("Distributor {}", id),
            wallet_paise: 0,
            credit_limit_paise: 0,
            tier_id: None,
            store_id: None,
            has_special_schemes: false,
        }
    }

    fn order(distributor_id: &str, d: NaiveDate, items: &[(&str, i64)]) -> SettledOrder {
        SettledOrder {
            distributor_id: distributor_id.to_string(),
            order_date: d,
            items: items
                .iter()
                .map(|(sku, qty)| SubmitItem {
                    sku_id: sku.to_string(),
                    quantity: *qty,
                })
                .collect(),
        }
    }

    fn distributors(ids: &[&str]) -> BTreeMap<String, Distributor> {
        ids.iter()
            .map(|id| (id.to_string(), distributor(id)))
            .collect()
    }

    #[test]
    fn test_accumulates_across_orders() {
        let pools = SchemePools::new(vec![scheme("sch-1", "a", 10, "b", 2)], vec![], vec![]);
        let orders = vec![
            order("d1", date(2026, 3, 1), &[("a", 20)]),
            order("d1", date(2026, 4, 1), &[("a", 10)]),
            order("d2", date(2026, 5, 1), &[("a", 10)]),
        ];

        let report = participation_report(&orders, &pools, &distributors(&["d1", "d2"]));

        let p = &report.schemes["sch-1"];
        assert_eq!(p.orders_applied, 3);
        assert_eq!(p.times_applied, 4); // 2 + 1 + 1
        assert_eq!(p.free_units, 8);
        // d1 participates twice but is counted once
        assert_eq!(p.distributor_ids, vec!["d1".to_string(), "d2".to_string()]);
    }

    #[test]
    fn test_movement_matrix() {
        let pools = SchemePools::new(vec![scheme("sch-1", "a", 10, "b", 2)], vec![], vec![]);
        let orders = vec![order("d1", date(2026, 3, 1), &[("a", 25), ("c", 4)])];

        let report = participation_report(&orders, &pools, &distributors(&["d1"]));

        let row = &report.movements["d1"];
        assert_eq!(row["a"], SkuMovement { paid: 25, free: 0 });
        assert_eq!(row["b"], SkuMovement { paid: 0, free: 4 });
        assert_eq!(row["c"], SkuMovement { paid: 4, free: 0 });
    }

    #[test]
    fn test_replay_uses_order_date() {
        let mut stopped = scheme("sch-1", "a", 10, "b", 2);
        stopped.stopped_on = Some(date(2026, 4, 1));
        stopped.stopped_by = Some("ops".to_string());
        let pools = SchemePools::new(vec![stopped], vec![], vec![]);

        let orders = vec![
            order("d1", date(2026, 3, 1), &[("a", 10)]), // before the stop
            order("d1", date(2026, 5, 1), &[("a", 10)]), // after the stop
        ];

        let report = participation_report(&orders, &pools, &distributors(&["d1"]));

        let p = &report.schemes["sch-1"];
        assert_eq!(p.orders_applied, 1);
        assert_eq!(p.free_units, 2);
        // Paid movement still counts for both orders
        assert_eq!(report.movements["d1"]["a"].paid, 20);
    }

    #[test]
    fn test_unknown_distributor_skipped() {
        let pools = SchemePools::new(vec![scheme("sch-1", "a", 10, "b", 2)], vec![], vec![]);
        let orders = vec![order("ghost", date(2026, 3, 1), &[("a", 10)])];

        let report = participation_report(&orders, &pools, &distributors(&["d1"]));

        assert!(report.schemes.is_empty());
        assert!(report.movements.is_empty());
    }

    #[test]
    fn test_no_matching_schemes_yields_paid_only_matrix() {
        let pools = SchemePools::empty();
        let orders = vec![order("d1", date(2026, 3, 1), &[("a", 10)])];

        let report = participation_report(&orders, &pools, &distributors(&["d1"]));

        assert!(report.schemes.is_empty());
        assert_eq!(report.movements["d1"]["a"], SkuMovement { paid: 10, free: 0 });
    }
}
