//! The four pricing stages, applied in order per product:
//! USD → HB Real → HB Naik → category base price → tax.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use archery_core::ValueObject;

use crate::category::PriceCategory;
use crate::rounding::{round_currency, usable};
use crate::tax::{total_active_tax_percentage, Tax};

/// Customer price for one category. Always computed fresh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPrice {
    pub base_price: i64,
    pub tax_amount: i64,
    pub tax_inclusive_price: i64,
    pub applied_tax_percentage: f64,
}

impl ValueObject for DerivedPrice {}

/// Local-currency cost from a USD price. Missing or non-finite input counts as 0.
pub fn derive_hb_real(usd_price: Option<f64>, exchange_rate: Option<f64>) -> i64 {
    let finite = |v: Option<f64>| v.filter(|v| v.is_finite()).unwrap_or(0.0);
    round_currency(finite(usd_price) * finite(exchange_rate))
}

/// HB Real after the percentage adjustment.
///
/// A zero HB Real yields 0. A missing, zero or NaN adjustment leaves HB Real
/// unchanged.
pub fn derive_hb_naik(hb_real: i64, adjustment_percentage: Option<f64>) -> i64 {
    if hb_real == 0 {
        return 0;
    }
    match usable(adjustment_percentage) {
        Some(pct) => round_currency(hb_real as f64 * (1.0 + pct / 100.0)),
        None => hb_real,
    }
}

/// HB Naik with a category markup. A non-finite markup leaves HB Naik unchanged.
pub fn derive_base_price(hb_naik: i64, category_percentage: f64) -> i64 {
    if !category_percentage.is_finite() {
        return hb_naik;
    }
    round_currency(hb_naik as f64 * (1.0 + category_percentage / 100.0))
}

/// Tax on a base price. A zero base or a zero/non-finite rate yields 0.
pub fn derive_tax_amount(base_price: i64, total_tax_percentage: f64) -> i64 {
    if base_price == 0 {
        return 0;
    }
    match usable(Some(total_tax_percentage)) {
        Some(pct) => round_currency(base_price as f64 * pct / 100.0),
        None => 0,
    }
}

/// Tax-inclusive price per category, keyed by lowercased category name.
///
/// A zero HB Naik short-circuits to an empty map: there is nothing to price
/// yet. Active taxes are summed once and applied to every category.
pub fn derive_customer_prices(
    hb_naik: i64,
    categories: &[PriceCategory],
    active_taxes: &[Tax],
) -> BTreeMap<String, DerivedPrice> {
    if hb_naik == 0 {
        debug!("no HB Naik, skipping customer prices");
        return BTreeMap::new();
    }

    let total_tax_percentage = total_active_tax_percentage(active_taxes);
    categories
        .iter()
        .map(|category| {
            let base_price = derive_base_price(hb_naik, category.percentage);
            let tax_amount = derive_tax_amount(base_price, total_tax_percentage);
            let price = DerivedPrice {
                base_price,
                tax_amount,
                tax_inclusive_price: base_price.saturating_add(tax_amount),
                applied_tax_percentage: total_tax_percentage,
            };
            (category.key(), price)
        })
        .collect()
}
