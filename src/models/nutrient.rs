//! Nutrient keys
//!
//! The closed set of per-100g nutrient fields carried by every product row.
//! Both row extraction and the calculator walk this list, so the two always
//! agree on which fields exist.

/// Number of tracked nutrients
pub const NUTRIENT_COUNT: usize = 25;

/// A nutrient value normalized to 100 g (or 100 ml) of product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    EnergyKcal,
    Fat,
    Carbohydrates,
    Sugars,
    Proteins,
    Salt,
    Fiber,
    VitaminA,
    VitaminC,
    Calcium,
    Iron,
    Magnesium,
    Potassium,
    Sodium,
    Zinc,
    Phosphorus,
    VitaminD,
    VitaminE,
    VitaminK,
    Folate,
    VitaminB12,
    VitaminB6,
    Copper,
    Manganese,
    Selenium,
}

impl Nutrient {
    /// All nutrients in display order
    pub const ALL: [Nutrient; NUTRIENT_COUNT] = [
        Nutrient::EnergyKcal,
        Nutrient::Fat,
        Nutrient::Carbohydrates,
        Nutrient::Sugars,
        Nutrient::Proteins,
        Nutrient::Salt,
        Nutrient::Fiber,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::Potassium,
        Nutrient::Sodium,
        Nutrient::Zinc,
        Nutrient::Phosphorus,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
        Nutrient::VitaminK,
        Nutrient::Folate,
        Nutrient::VitaminB12,
        Nutrient::VitaminB6,
        Nutrient::Copper,
        Nutrient::Manganese,
        Nutrient::Selenium,
    ];

    /// Key used in the Open Food Facts `nutriments` object and in row JSON
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::EnergyKcal => "energy-kcal_100g",
            Nutrient::Fat => "fat_100g",
            Nutrient::Carbohydrates => "carbohydrates_100g",
            Nutrient::Sugars => "sugars_100g",
            Nutrient::Proteins => "proteins_100g",
            Nutrient::Salt => "salt_100g",
            Nutrient::Fiber => "fiber_100g",
            Nutrient::VitaminA => "vitamin-a_100g",
            Nutrient::VitaminC => "vitamin-c_100g",
            Nutrient::Calcium => "calcium_100g",
            Nutrient::Iron => "iron_100g",
            Nutrient::Magnesium => "magnesium_100g",
            Nutrient::Potassium => "potassium_100g",
            Nutrient::Sodium => "sodium_100g",
            Nutrient::Zinc => "zinc_100g",
            Nutrient::Phosphorus => "phosphorus_100g",
            Nutrient::VitaminD => "vitamin-d_100g",
            Nutrient::VitaminE => "vitamin-e_100g",
            Nutrient::VitaminK => "vitamin-k_100g",
            Nutrient::Folate => "folate_100g",
            Nutrient::VitaminB12 => "vitamin-b12_100g",
            Nutrient::VitaminB6 => "vitamin-b6_100g",
            Nutrient::Copper => "copper_100g",
            Nutrient::Manganese => "manganese_100g",
            Nutrient::Selenium => "selenium_100g",
        }
    }

    /// Human-readable column label with unit
    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::EnergyKcal => "Energy (kcal)",
            Nutrient::Fat => "Fat (g)",
            Nutrient::Carbohydrates => "Carbohydrates (g)",
            Nutrient::Sugars => "Sugars (g)",
            Nutrient::Proteins => "Proteins (g)",
            Nutrient::Salt => "Salt (g)",
            Nutrient::Fiber => "Fiber (g)",
            Nutrient::VitaminA => "Vitamin A (µg)",
            Nutrient::VitaminC => "Vitamin C (mg)",
            Nutrient::Calcium => "Calcium (mg)",
            Nutrient::Iron => "Iron (mg)",
            Nutrient::Magnesium => "Magnesium (mg)",
            Nutrient::Potassium => "Potassium (mg)",
            Nutrient::Sodium => "Sodium (mg)",
            Nutrient::Zinc => "Zinc (mg)",
            Nutrient::Phosphorus => "Phosphorus (mg)",
            Nutrient::VitaminD => "Vitamin D (µg)",
            Nutrient::VitaminE => "Vitamin E (mg)",
            Nutrient::VitaminK => "Vitamin K (µg)",
            Nutrient::Folate => "Folate (µg)",
            Nutrient::VitaminB12 => "Vitamin B12 (µg)",
            Nutrient::VitaminB6 => "Vitamin B6 (mg)",
            Nutrient::Copper => "Copper (mg)",
            Nutrient::Manganese => "Manganese (mg)",
            Nutrient::Selenium => "Selenium (µg)",
        }
    }

    /// Look up a nutrient by its `_100g` key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|n| n.key() == key)
    }

    /// Position of this nutrient in [`Nutrient::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_position_in_all() {
        for (i, nutrient) in Nutrient::ALL.iter().enumerate() {
            assert_eq!(nutrient.index(), i);
        }
    }

    #[test]
    fn test_keys_carry_100g_suffix_and_round_trip() {
        for nutrient in Nutrient::ALL {
            assert!(nutrient.key().ends_with("_100g"));
            assert_eq!(Nutrient::from_key(nutrient.key()), Some(nutrient));
        }
        assert_eq!(Nutrient::from_key("energy_100g"), None);
    }
}
