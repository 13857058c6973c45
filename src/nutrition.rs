use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::GRAMS_PER_SERVING;

/// Energy and macronutrients for one 250 g serving (or for a scaled portion).
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub energy_kcal: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub proteins_g: f64,
}

impl Macros {
    pub fn scale(self, factor: f64) -> Self {
        Self {
            energy_kcal: self.energy_kcal * factor,
            carbs_g: self.carbs_g * factor,
            fats_g: self.fats_g * factor,
            proteins_g: self.proteins_g * factor,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutritionTable {
    meals: BTreeMap<String, Macros>,
}

impl NutritionTable {
    pub fn builtin() -> Self {
        let meals = MEAL_MACROS
            .iter()
            .map(|&(name, energy_kcal, carbs_g, fats_g, proteins_g)| {
                (
                    name.to_string(),
                    Macros {
                        energy_kcal,
                        carbs_g,
                        fats_g,
                        proteins_g,
                    },
                )
            })
            .collect();
        Self { meals }
    }

    pub fn per_serving(&self, meal: &str) -> Option<Macros> {
        self.meals.get(meal).copied()
    }

    /// Macros for `grams` of a meal. Negative weights count as zero.
    pub fn scaled(&self, meal: &str, grams: f64) -> Option<Macros> {
        let per_serving = self.per_serving(meal)?;
        Some(per_serving.scale(grams.max(0.0) / GRAMS_PER_SERVING))
    }
}

// (meal, kcal, carbs g, fats g, proteins g) per 250 g.
const MEAL_MACROS: &[(&str, f64, f64, f64, f64)] = &[
    ("Eggs", 388.0, 2.5, 27.5, 32.5),
    ("Cereal", 500.0, 112.5, 5.0, 12.5),
    ("Toast", 200.0, 37.5, 2.5, 7.5),
    ("Oatmeal", 375.0, 67.5, 5.0, 12.5),
    ("Sandwich", 700.0, 80.0, 37.5, 50.0),
    ("Salad", 400.0, 20.0, 30.0, 20.0),
    ("Soup", 300.0, 50.0, 12.5, 25.0),
    ("Pasta", 600.0, 100.0, 20.0, 37.5),
    ("Chicken", 500.0, 0.0, 20.0, 75.0),
    ("Steak", 700.0, 0.0, 40.0, 62.5),
    ("Fish", 400.0, 0.0, 16.0, 62.5),
    ("Vegetables", 200.0, 50.0, 5.0, 12.5),
    ("Beef", 700.0, 0.0, 45.0, 60.0),
    ("Pork", 600.0, 0.0, 30.0, 70.0),
    ("Lamb", 600.0, 0.0, 35.0, 65.0),
    ("Prawns", 200.0, 0.0, 5.0, 30.0),
    ("Milk", 500.0, 112.5, 5.0, 12.5),
    ("Tofu", 500.0, 112.5, 5.0, 12.5),
    ("Bread", 200.0, 37.5, 2.5, 7.5),
    ("Veggie Sandwich", 700.0, 80.0, 37.5, 50.0),
    ("Salad Mix", 400.0, 20.0, 30.0, 20.0),
    ("Veg Pasta", 600.0, 100.0, 20.0, 37.5),
    ("Root Vegetables", 200.0, 50.0, 5.0, 12.5),
    ("Crab", 150.0, 0.0, 2.0, 20.0),
    ("Cheese", 150.0, 0.0, 2.0, 20.0),
    ("Dark Chocolate", 150.0, 0.0, 2.0, 20.0),
    ("Rice", 150.0, 0.0, 2.0, 20.0),
    ("Berries", 150.0, 0.0, 2.0, 20.0),
    ("Banana", 150.0, 0.0, 2.0, 20.0),
    ("Tomato", 150.0, 0.0, 2.0, 20.0),
    ("Orange/ Apple", 150.0, 0.0, 2.0, 20.0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::table::CoefficientTable;

    #[test]
    fn half_serving_halves_macros() {
        let t = NutritionTable::builtin();
        let m = t.scaled("Chicken", 125.0).unwrap();
        assert!((m.energy_kcal - 250.0).abs() < 1e-9);
        assert!((m.proteins_g - 37.5).abs() < 1e-9);
        assert_eq!(m.carbs_g, 0.0);
    }

    #[test]
    fn every_food_category_has_macros() {
        let t = NutritionTable::builtin();
        let canonical = CoefficientTable::builtin(Domain::Food);
        let legacy = CoefficientTable::legacy(Domain::Food);
        for category in canonical.categories().chain(legacy.categories()) {
            assert!(t.per_serving(category).is_some(), "no macros for {category}");
        }
    }

    #[test]
    fn unknown_meal_has_no_macros() {
        assert!(NutritionTable::builtin().scaled("Ramen", 250.0).is_none());
    }

    #[test]
    fn negative_grams_scale_to_zero() {
        let m = NutritionTable::builtin().scaled("Eggs", -50.0).unwrap();
        assert_eq!(m, Macros::default());
    }
}
