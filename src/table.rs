use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::FootprintError;

/// Static per-category emission factors (kg CO2 per unit of quantity).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct CoefficientTable {
    entries: BTreeMap<String, f64>,
}

/// A category whose factor differs between two versions of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    pub category: String,
    pub ours: Option<f64>,
    pub theirs: Option<f64>,
}

impl CoefficientTable {
    /// Builds a table, rejecting negative or non-finite factors.
    pub fn new<I, S>(entries: I) -> Result<Self, FootprintError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (category, value) in entries {
            let category = category.into();
            if !value.is_finite() || value < 0.0 {
                return Err(FootprintError::NegativeCoefficient { category, value });
            }
            map.insert(category, value);
        }
        Ok(Self { entries: map })
    }

    pub fn coefficient(&self, category: &str) -> Option<f64> {
        self.entries.get(category).copied()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical table for a domain.
    pub fn builtin(domain: Domain) -> Self {
        let rows: &[(&str, f64)] = match domain {
            Domain::Commute => COMMUTE,
            Domain::Food => FOOD_PER_SERVING,
            Domain::Appliances => APPLIANCES,
        };
        Self::from_static(rows)
    }

    /// Older table version still seen in the field.
    /// Kept only so callers can flag differences against [`CoefficientTable::builtin`].
    pub fn legacy(domain: Domain) -> Self {
        let rows: &[(&str, f64)] = match domain {
            Domain::Commute => COMMUTE_LEGACY,
            Domain::Food => FOOD_PER_250G_LEGACY,
            Domain::Appliances => APPLIANCES_LEGACY,
        };
        Self::from_static(rows)
    }

    /// Low-impact swaps priced per serving, for food alternatives.
    pub fn low_impact_foods() -> Self {
        Self::from_static(LOW_IMPACT_FOODS)
    }

    /// This table with `overlay` entries added; overlay wins on conflicts.
    pub fn merged(&self, overlay: &CoefficientTable) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(overlay.entries.iter().map(|(k, v)| (k.clone(), *v)));
        Self { entries }
    }

    /// Categories present in only one table, or present in both with different factors.
    /// Sorted by category name.
    pub fn discrepancies(&self, other: &CoefficientTable) -> Vec<Discrepancy> {
        let mut out = Vec::new();
        for (category, &ours) in &self.entries {
            match other.entries.get(category) {
                Some(&theirs) if (theirs - ours).abs() <= f64::EPSILON => {}
                theirs => out.push(Discrepancy {
                    category: category.clone(),
                    ours: Some(ours),
                    theirs: theirs.copied(),
                }),
            }
        }
        for (category, &theirs) in &other.entries {
            if !self.entries.contains_key(category) {
                out.push(Discrepancy {
                    category: category.clone(),
                    ours: None,
                    theirs: Some(theirs),
                });
            }
        }
        out.sort_by(|a, b| a.category.cmp(&b.category));
        out
    }

    fn from_static(rows: &[(&str, f64)]) -> Self {
        Self {
            entries: rows.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, f64>> for CoefficientTable {
    type Error = FootprintError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<CoefficientTable> for BTreeMap<String, f64> {
    fn from(table: CoefficientTable) -> Self {
        table.entries
    }
}

// kg CO2 per mile.
const COMMUTE: &[(&str, f64)] = &[
    ("Car", 0.404),
    ("Bicycle", 0.002),
    ("Walking", 0.01),
    ("Bus", 0.299),
    ("Train", 0.177),
    ("Motorcycle", 0.225),
    ("Electric Vehicle", 0.05),
    ("Carpool", 0.202),
];

const COMMUTE_LEGACY: &[(&str, f64)] = &[
    ("Car", 0.404),
    ("Bicycle", 0.002),
    ("Walking", 0.01),
    ("Motorcycle", 0.225),
    ("Electric Vehicle", 0.05),
    ("Carpool", 0.202),
];

// kg CO2 per serving.
const FOOD_PER_SERVING: &[(&str, f64)] = &[
    ("Eggs", 0.2),
    ("Cereal", 0.03),
    ("Milk", 0.32),
    ("Tofu", 0.08),
    ("Bread", 0.025),
    ("Oatmeal", 0.047),
    ("Veggie Sandwich", 0.4),
    ("Salad Mix", 0.07),
    ("Soup", 0.3),
    ("Veg Pasta", 0.11),
    ("Chicken", 1.82),
    ("Fish", 1.34),
    ("Root Vegetables", 0.04),
    ("Beef", 15.5),
    ("Pork", 2.44),
    ("Lamb", 5.84),
    ("Prawns", 4.07),
    ("Crab", 1.77),
    ("Cheese", 2.79),
    ("Dark Chocolate", 0.95),
    ("Rice", 0.16),
    ("Berries", 0.22),
    ("Banana", 0.11),
    ("Tomato", 0.06),
    ("Orange/ Apple", 0.05),
];

// kg CO2 per serving. Shared names agree with FOOD_PER_SERVING.
const LOW_IMPACT_FOODS: &[(&str, f64)] = &[
    ("Locally sourced Fruits", 0.05),
    ("Locally sourced Vegetables", 0.08),
    ("Legumes", 0.067),
    ("Rice", 0.16),
    ("Tofu", 0.08),
    ("Milk", 0.32),
    ("Eggs", 0.2),
    ("Bread", 0.025),
    ("Soup", 0.3),
    ("Veg Pasta", 0.11),
    ("Nuts", 0.014),
    ("Salad Mix", 0.07),
    ("Dark Chocolate", 0.95),
];

// kg CO2 per 250 g; pair with GRAMS_PER_SERVING as the divisor.
const FOOD_PER_250G_LEGACY: &[(&str, f64)] = &[
    ("Eggs", 0.2),
    ("Cereal", 0.3),
    ("Toast", 0.1),
    ("Oatmeal", 0.25),
    ("Sandwich", 0.4),
    ("Salad", 0.15),
    ("Soup", 0.2),
    ("Pasta", 0.35),
    ("Chicken", 0.45),
    ("Steak", 0.6),
    ("Fish", 0.5),
    ("Vegetables", 0.1),
];

// kg CO2 per hour of use.
const APPLIANCES: &[(&str, f64)] = &[
    ("Refrigerator", 0.22),
    ("Television", 0.088),
    ("Computer/Laptop", 0.015),
    ("Washing Machine", 0.75),
    ("Dryer", 1.0),
    ("Dishwasher", 0.7),
    ("Oven/Stove", 0.3),
    ("Microwave", 0.2),
    ("Toaster", 0.1),
    ("Electric Kettle", 0.1),
    ("Coffee Maker", 0.075),
    ("Blender", 0.075),
    ("Vacuum Cleaner", 0.15),
    ("Iron", 0.1),
    ("Hairdryer", 0.15),
    ("Air Conditioner", 1.25),
    ("Heater", 1.25),
    ("Fan", 0.075),
    ("Incandescent Light", 0.05),
    ("Water Heater", 1.5),
];

const APPLIANCES_LEGACY: &[(&str, f64)] = &[
    ("Refrigerator", 0.5),
    ("Television", 0.1),
    ("Computer/Laptop", 0.015),
    ("Washing Machine", 0.75),
    ("Dryer", 1.0),
    ("Dishwasher", 0.7),
    ("Oven/Stove", 0.3),
    ("Microwave", 0.2),
    ("Toaster", 0.1),
    ("Electric Kettle", 0.1),
    ("Coffee Maker", 0.075),
    ("Blender", 0.075),
    ("Vacuum Cleaner", 0.15),
    ("Iron", 0.1),
    ("Hairdryer", 0.15),
    ("Air Conditioner", 1.25),
    ("Heater", 1.25),
    ("Fan", 0.075),
    ("LED Light", 0.0075),
    ("Incandescent Light", 0.05),
    ("Water Heater", 1.5),
];
