//! Whole-product pricing: every stage in one call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::PriceCategory;
use crate::pipeline::{derive_customer_prices, derive_hb_naik, derive_hb_real, DerivedPrice};
use crate::tax::{total_active_tax_percentage, Tax};

/// Pricing fields of one product form. Every field may still be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingInput {
    pub usd_price: Option<f64>,
    pub exchange_rate: Option<f64>,
    pub adjustment_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSheet {
    pub hb_real: i64,
    pub hb_naik: i64,
    pub total_tax_percentage: f64,
    pub prices: BTreeMap<String, DerivedPrice>,
}

pub fn derive_price_sheet(
    input: &PricingInput,
    categories: &[PriceCategory],
    taxes: &[Tax],
) -> PriceSheet {
    let hb_real = derive_hb_real(input.usd_price, input.exchange_rate);
    let hb_naik = derive_hb_naik(hb_real, input.adjustment_percentage);
    PriceSheet {
        hb_real,
        hb_naik,
        total_tax_percentage: total_active_tax_percentage(taxes),
        prices: derive_customer_prices(hb_naik, categories, taxes),
    }
}
