use serde::{Deserialize, Serialize};

use archery_core::{Entity, Status, TaxId};

/// A tax rate. Only active taxes take part in price derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    pub id: TaxId,
    pub name: String,
    pub percentage: f64,
    pub status: Status,
}

impl Tax {
    pub fn active(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: TaxId::new(),
            name: name.into(),
            percentage,
            status: Status::Active,
        }
    }

    pub fn inactive(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            status: Status::Inactive,
            ..Self::active(name, percentage)
        }
    }
}

impl Entity for Tax {
    type Id = TaxId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Sum of active tax percentages. Taxes add up; they do not compound.
///
/// Inactive taxes are left out entirely, as are non-finite percentages.
pub fn total_active_tax_percentage(taxes: &[Tax]) -> f64 {
    taxes
        .iter()
        .filter(|t| t.status.is_active() && t.percentage.is_finite())
        .map(|t| t.percentage)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_active_taxes_only() {
        let taxes = [
            Tax::active("VAT", 11.0),
            Tax::inactive("Luxury", 20.0),
            Tax::active("Regional", 2.5),
        ];
        assert_eq!(total_active_tax_percentage(&taxes), 13.5);
    }

    #[test]
    fn no_taxes_is_zero() {
        assert_eq!(total_active_tax_percentage(&[]), 0.0);
    }

    #[test]
    fn nan_percentage_is_ignored() {
        let taxes = [Tax::active("VAT", 11.0), Tax::active("Broken", f64::NAN)];
        assert_eq!(total_active_tax_percentage(&taxes), 11.0);
    }

    #[test]
    fn deserializes_status() {
        let json = format!(
            r#"{{"id": "{}", "name": "VAT", "percentage": 11, "status": "inactive"}}"#,
            TaxId::new()
        );
        let tax: Tax = serde_json::from_str(&json).unwrap();
        assert!(!tax.status.is_active());
        assert_eq!(tax.percentage, 11.0);
    }
}
