//! Pricing domain module: HB Real → HB Naik → per-category, tax-inclusive prices.
//!
//! All functions are total. Malformed or missing numeric input degrades to 0
//! or passes through unchanged so live-edited forms always render.

pub mod category;
pub mod pipeline;
pub mod rounding;
pub mod sheet;
pub mod tax;

pub use category::PriceCategory;
pub use pipeline::{
    derive_base_price, derive_customer_prices, derive_hb_naik, derive_hb_real, derive_tax_amount,
    DerivedPrice,
};
pub use rounding::round_currency;
pub use sheet::{derive_price_sheet, PriceSheet, PricingInput};
pub use tax::{total_active_tax_percentage, Tax};
