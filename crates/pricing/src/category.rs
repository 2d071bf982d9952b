use serde::{Deserialize, Serialize};

use archery_core::{Entity, PriceCategoryId};

/// A named markup tier (e.g. "Elite", "Super", "Basic").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCategory {
    pub id: PriceCategoryId,
    pub name: String,
    /// Markup over HB Naik.
    pub percentage: f64,
    pub display_order: i32,
}

impl PriceCategory {
    pub fn new(name: impl Into<String>, percentage: f64, display_order: i32) -> Self {
        Self {
            id: PriceCategoryId::new(),
            name: name.into(),
            percentage,
            display_order,
        }
    }

    /// Output key for derived prices: the lowercased name.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Categories in display order (stable for equal orders).
    pub fn sorted_by_display_order(categories: &[PriceCategory]) -> Vec<&PriceCategory> {
        let mut sorted: Vec<&PriceCategory> = categories.iter().collect();
        sorted.sort_by_key(|c| c.display_order);
        sorted
    }
}

impl Entity for PriceCategory {
    type Id = PriceCategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_lowercased_name() {
        assert_eq!(PriceCategory::new("Elite", 10.0, 1).key(), "elite");
    }

    #[test]
    fn sorts_by_display_order() {
        let categories = [
            PriceCategory::new("Basic", 30.0, 3),
            PriceCategory::new("Elite", 10.0, 1),
            PriceCategory::new("Super", 20.0, 2),
        ];
        let names: Vec<&str> = PriceCategory::sorted_by_display_order(&categories)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Elite", "Super", "Basic"]);
    }
}
