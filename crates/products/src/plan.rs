//! Bulk variant creation: expand, then give every combination a SKU, a name
//! and a unique code.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use archery_core::{DomainError, DomainResult, ValueObject};

use crate::axis::VariantAxis;
use crate::code::{
    generate_sequential_code, is_unique_among, CodeGenerator, CodeLookup, VariantCode,
    VariantCodeRequest,
};
use crate::combination::{expand, SelectedVariantSpec, VariantCombination};
use crate::sku::{assemble_name, assemble_sku, ValueCodeSource};

/// One product's bulk-creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPlanRequest {
    pub base_sku: String,
    pub brand: String,
    pub product_type: String,
    pub product_name: String,
    pub selected: Vec<SelectedVariantSpec>,
    /// Unique codes already used under this base SKU.
    pub existing_codes: Vec<String>,
}

/// A variant ready to be submitted; nothing is persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDraft {
    pub combination: VariantCombination,
    pub sku: String,
    pub name: String,
    pub code: VariantCode,
}

impl ValueObject for VariantDraft {}

/// Plan every variant of the selection, in expansion order.
///
/// Unique codes are sequential in expansion order, skipping any sequence
/// number whose code is already in `existing_codes`. Two drafts assembling to
/// the same SKU means the per-axis code precondition was broken; that is
/// reported as a `Conflict` rather than emitting duplicates.
pub fn plan_variants<L, S, R>(
    generator: &CodeGenerator<L>,
    rng: &mut R,
    request: &VariantPlanRequest,
    catalog: &[VariantAxis],
    codes: &mut S,
) -> DomainResult<Vec<VariantDraft>>
where
    L: CodeLookup,
    S: ValueCodeSource + ?Sized,
    R: Rng + ?Sized,
{
    if request.base_sku.trim().is_empty() {
        return Err(DomainError::validation("base SKU cannot be empty"));
    }

    let combinations = expand(&request.selected, catalog);
    let mut skus = HashSet::with_capacity(combinations.len());
    let mut taken = request.existing_codes.clone();
    let mut drafts = Vec::with_capacity(combinations.len());
    let mut next_index = 0usize;

    for combination in combinations {
        let sku = assemble_sku(&request.base_sku, &combination, codes)?;
        if !skus.insert(sku.clone()) {
            return Err(DomainError::conflict(format!("SKU {sku} assembled twice")));
        }
        let name = assemble_name(
            &request.brand,
            &request.product_type,
            &request.product_name,
            &combination,
        );
        while !is_unique_among(&generate_sequential_code(next_index), &taken) {
            next_index += 1;
        }
        let code = generator.variant_code_with(
            rng,
            VariantCodeRequest {
                base_sku: request.base_sku.trim(),
                index: Some(next_index),
                custom_code: None,
            },
            &taken,
        )?;
        next_index += 1;
        taken.push(code.unique_code.clone());
        drafts.push(VariantDraft {
            combination,
            sku,
            name,
            code,
        });
    }

    debug!(base_sku = %request.base_sku, drafts = drafts.len(), "planned variants");
    Ok(drafts)
}
