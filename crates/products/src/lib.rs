//! Products domain module: variant codes, combination expansion and SKU assembly.
//!
//! This crate contains the variant/SKU rules of the catalog, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage). Randomness only
//! enters through a caller-supplied `Rng`.

pub mod axis;
pub mod code;
pub mod combination;
pub mod plan;
pub mod sku;

pub use axis::{VariantAxis, VariantValue};
pub use code::{
    check_unique_code, format_code, generate_from_name, generate_random_code,
    generate_sequential_code, generate_variant_code, is_unique_among, is_valid_unique_code,
    is_valid_value_code, is_valid_variant_code, sanitize_input, CodeDictionary, CodeGenerator,
    CodeKind, CodeLookup, GeneratorConfig, VariantCode, VariantCodeRequest, VariantCodeStrategy,
};
pub use combination::{expand, CombinationEntry, SelectedVariantSpec, ValueRef, VariantCombination};
pub use plan::{plan_variants, VariantDraft, VariantPlanRequest};
pub use sku::{assemble_name, assemble_sku, CatalogCodeSource, ValueCodeSource};
