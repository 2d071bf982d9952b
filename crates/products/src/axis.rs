use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use archery_core::{DomainError, DomainResult, Entity, Status, VariantAxisId, VariantValueId};

use crate::code::{format_code, is_valid_value_code};

/// One value of a variant axis (e.g. "Black" on "Color").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantValue {
    pub id: VariantValueId,
    pub name: String,
    /// Two-character uppercase shorthand, unique within the axis.
    pub code: Option<String>,
    /// Tie-break when composing combined names.
    pub display_order: i32,
}

impl VariantValue {
    pub fn new(name: impl Into<String>, code: Option<&str>, display_order: i32) -> Self {
        Self {
            id: VariantValueId::new(),
            name: name.into(),
            code: code.map(|c| format_code(c.trim())),
            display_order,
        }
    }
}

impl Entity for VariantValue {
    type Id = VariantValueId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A named dimension of variation (a.k.a. variant type).
///
/// Catalog master: owned by the CRUD screens, only read by expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAxis {
    pub id: VariantAxisId,
    pub name: String,
    pub values: Vec<VariantValue>,
    pub display_order: i32,
    pub status: Status,
}

impl VariantAxis {
    /// Build an active axis, checking value codes.
    pub fn new(
        name: impl Into<String>,
        display_order: i32,
        values: Vec<VariantValue>,
    ) -> DomainResult<Self> {
        let axis = Self {
            id: VariantAxisId::new(),
            name: name.into(),
            values,
            display_order,
            status: Status::Active,
        };
        axis.validate()?;
        Ok(axis)
    }

    /// Value codes must be well-formed and unique within the axis.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("axis name cannot be empty"));
        }
        let mut seen = HashSet::new();
        for value in &self.values {
            let Some(code) = value.code.as_deref() else {
                continue;
            };
            if !is_valid_value_code(code) {
                return Err(DomainError::validation(format!(
                    "value {} has malformed code {code:?}",
                    value.name
                )));
            }
            if !seen.insert(code) {
                return Err(DomainError::invariant(format!(
                    "code {code} is used twice in axis {}",
                    self.name
                )));
            }
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn value(&self, id: VariantValueId) -> Option<&VariantValue> {
        self.values.iter().find(|v| v.id == id)
    }

    /// Case-insensitive, whitespace-trimmed name match.
    pub fn value_by_name(&self, name: &str) -> Option<&VariantValue> {
        let name = name.trim();
        self.values
            .iter()
            .find(|v| v.name.trim().eq_ignore_ascii_case(name))
    }

    /// Codes already stored on this axis's values.
    pub fn codes(&self) -> Vec<String> {
        self.values.iter().filter_map(|v| v.code.clone()).collect()
    }
}

impl Entity for VariantAxis {
    type Id = VariantAxisId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_axis_normalizes_value_codes() {
        let axis = VariantAxis::new(
            "Color",
            1,
            vec![VariantValue::new("Black", Some(" bk "), 1)],
        )
        .unwrap();
        assert_eq!(axis.values[0].code.as_deref(), Some("BK"));
        assert!(axis.is_active());
    }

    #[test]
    fn duplicate_codes_within_axis_are_rejected() {
        let err = VariantAxis::new(
            "Color",
            1,
            vec![
                VariantValue::new("Black", Some("BK"), 1),
                VariantValue::new("Burgundy", Some("bk"), 2),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn malformed_codes_are_rejected() {
        let err = VariantAxis::new("Color", 1, vec![VariantValue::new("Black", Some("BLK"), 1)])
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn values_without_codes_are_allowed() {
        let axis = VariantAxis::new(
            "Draw Weight",
            2,
            vec![
                VariantValue::new("30 lbs", None, 1),
                VariantValue::new("40 lbs", None, 2),
            ],
        )
        .unwrap();
        assert!(axis.codes().is_empty());
    }

    #[test]
    fn looks_up_values_by_id_and_name() {
        let axis = VariantAxis::new(
            "Hand",
            1,
            vec![
                VariantValue::new("Left", Some("LH"), 1),
                VariantValue::new("Right", Some("RH"), 2),
            ],
        )
        .unwrap();
        let right = axis.values[1].id;
        assert_eq!(axis.value(right).map(|v| v.name.as_str()), Some("Right"));
        assert_eq!(Entity::id(&axis.values[1]), &right);
        assert_eq!(axis.value_by_name(" left ").map(|v| v.id), Some(axis.values[0].id));
        assert!(axis.value_by_name("Ambidextrous").is_none());
    }
}
