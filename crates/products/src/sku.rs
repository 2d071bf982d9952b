//! Variant SKU and display-name assembly.
//!
//! Precondition: value codes are unique within their axis (see
//! [`VariantAxis::validate`]). Under that precondition two combinations that
//! differ in any (axis, value) pair assemble to different SKUs; the assembler
//! itself does not check it.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;

use archery_core::{DomainError, DomainResult, VariantAxisId, VariantValueId};

use crate::axis::VariantAxis;
use crate::code::{format_code, CodeGenerator, CodeLookup};
use crate::combination::{CombinationEntry, VariantCombination};

/// Supplies the short code for a value while assembling SKUs.
pub trait ValueCodeSource {
    fn code_for(&mut self, entry: &CombinationEntry) -> DomainResult<String>;
}

/// Fixed value → code table. Values missing from the table are a validation error.
impl ValueCodeSource for BTreeMap<VariantValueId, String> {
    fn code_for(&mut self, entry: &CombinationEntry) -> DomainResult<String> {
        self.get(&entry.value_id).cloned().ok_or_else(|| {
            DomainError::validation(format!("no code for value {}", entry.value_name))
        })
    }
}

/// Uses each value's stored code; derives missing ones from the value name.
///
/// Derived codes avoid the codes already present on the same axis and are
/// remembered, so a value gets one code across every combination assembled
/// through this source.
pub struct CatalogCodeSource<'g, L, R> {
    generator: &'g CodeGenerator<L>,
    rng: R,
    used: HashMap<VariantAxisId, Vec<String>>,
    assigned: HashMap<VariantValueId, String>,
}

impl<'g, L: CodeLookup, R: Rng> CatalogCodeSource<'g, L, R> {
    pub fn new(generator: &'g CodeGenerator<L>, catalog: &[VariantAxis], rng: R) -> Self {
        let used = catalog.iter().map(|axis| (axis.id, axis.codes())).collect();
        Self {
            generator,
            rng,
            used,
            assigned: HashMap::new(),
        }
    }

    /// Codes derived so far, by value.
    pub fn assigned(&self) -> &HashMap<VariantValueId, String> {
        &self.assigned
    }
}

impl<L: CodeLookup, R: Rng> ValueCodeSource for CatalogCodeSource<'_, L, R> {
    fn code_for(&mut self, entry: &CombinationEntry) -> DomainResult<String> {
        if let Some(code) = &entry.value_code {
            return Ok(code.clone());
        }
        if let Some(code) = self.assigned.get(&entry.value_id) {
            return Ok(code.clone());
        }
        let used = self.used.entry(entry.axis_id).or_default();
        let code = self
            .generator
            .from_name_with(&mut self.rng, &entry.value_name, used.as_slice())?;
        used.push(code.clone());
        self.assigned.insert(entry.value_id, code.clone());
        Ok(code)
    }
}

/// `"{base_sku}-{code1code2...}"`, codes in axis display order.
pub fn assemble_sku<S: ValueCodeSource + ?Sized>(
    base_sku: &str,
    combination: &VariantCombination,
    codes: &mut S,
) -> DomainResult<String> {
    let suffix = combination
        .sorted_entries()
        .into_iter()
        .map(|entry| codes.code_for(entry).map(|code| format_code(&code)))
        .collect::<DomainResult<String>>()?;
    Ok(format!("{}-{suffix}", base_sku.trim()))
}

/// `"{brand} {product_type} {product_name} {values...}"` with values in
/// display order. Blank parts are left out so separators stay single spaces.
pub fn assemble_name(
    brand: &str,
    product_type: &str,
    product_name: &str,
    combination: &VariantCombination,
) -> String {
    let sorted = combination.sorted_entries();
    [brand, product_type, product_name]
        .into_iter()
        .chain(sorted.iter().map(|e| e.value_name.as_str()))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
