//! # Order Totals
//!
//! Display lines and the subtotal / GST / grand-total summary.
//!
//! GST is computed per line (line subtotal × SKU rate, rounded half-up at
//! the paisa) and summed, matching how the order is persisted and printed
//! line by line downstream. Freebie lines carry zero value: they appear on
//! the order for information, but contribute nothing to subtotal or GST.
//!
//! `grand_total = subtotal + gst_amount` holds exactly; all three are
//! integer paise.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{GstRate, GstTreatment};

// =============================================================================
// Order Line
// =============================================================================

/// A resolved display line: what the host renders in the order table.
///
/// Paid lines come from the draft; freebie lines are generated by scheme
/// allocation with a zero unit price and a scheme-source label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub sku_id: String,
    pub name: String,
    pub quantity: i64,
    /// Effective unit price in paise. Zero for freebies.
    pub unit_price_paise: i64,
    /// SKU GST rate in basis points (informational on freebie lines).
    pub gst_rate_bps: u32,
    /// True for scheme-granted lines.
    pub freebie: bool,
    /// True when a tier override supplied the unit price.
    pub tier_price: bool,
    /// Description of the granting scheme, set on freebie lines only.
    pub scheme_label: Option<String>,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the GST rate.
    #[inline]
    pub fn gst_rate(&self) -> GstRate {
        GstRate::from_bps(self.gst_rate_bps)
    }

    /// Line subtotal: quantity × unit price. Zero for freebie lines,
    /// whatever their informational unit price.
    pub fn line_subtotal(&self) -> Money {
        if self.freebie {
            return Money::zero();
        }
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// GST for this line. Zero for freebies and for GST-exempt orders.
    pub fn line_gst(&self, treatment: GstTreatment) -> Money {
        if self.freebie || treatment == GstTreatment::Exempt {
            return Money::zero();
        }
        self.line_subtotal().gst(self.gst_rate())
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The order summary: subtotal, GST, grand total. All integer paise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal_paise: i64,
    pub gst_paise: i64,
    pub grand_total_paise: i64,
}

impl OrderTotals {
    /// Computes the summary over the display lines.
    ///
    /// Paid lines contribute `qty × unit price` to the subtotal and their
    /// per-line GST to the tax amount; freebie lines contribute nothing.
    /// For GST-exempt orders (internal store transfers) the subtotal
    /// alone is the total value of goods.
    pub fn compute(lines: &[OrderLine], treatment: GstTreatment) -> Self {
        let mut subtotal = Money::zero();
        let mut gst = Money::zero();

        for line in lines {
            if line.freebie {
                continue;
            }
            subtotal += line.line_subtotal();
            gst += line.line_gst(treatment);
        }

        let grand_total = subtotal + gst;
        OrderTotals {
            subtotal_paise: subtotal.paise(),
            gst_paise: gst.paise(),
            grand_total_paise: grand_total.paise(),
        }
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    /// Returns the GST amount as Money.
    #[inline]
    pub fn gst_amount(&self) -> Money {
        Money::from_paise(self.gst_paise)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_paise(self.grand_total_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
