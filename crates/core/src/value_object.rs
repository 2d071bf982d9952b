//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Combinations, variant drafts and derived prices are value objects: built
/// fresh on every computation, compared by their attribute values and never
/// mutated in place. To "modify" one, compute a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct DerivedPrice { base_price: i64, tax_amount: i64, /* .. */ }
///
/// impl ValueObject for DerivedPrice {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
