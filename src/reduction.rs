use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::aggregator::{EmissionResult, QuantityMap};

/// What a user can do about one category, and the per-hour factor used to
/// price the reduced usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionProfile {
    pub actions: Vec<String>,
    pub coefficient: f64,
}

impl ReductionProfile {
    pub fn allows(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

/// One reduction the user committed to: an action on a category for some hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionPlan {
    pub category: String,
    pub action: String,
    pub hours: f64,
}

/// Category -> reduction profile. Adding a category is a data entry, not new control flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReductionCatalog {
    profiles: BTreeMap<String, ReductionProfile>,
}

impl ReductionCatalog {
    pub fn new(profiles: BTreeMap<String, ReductionProfile>) -> Self {
        Self { profiles }
    }

    /// Household appliance actions.
    pub fn builtin() -> Self {
        let profiles = APPLIANCE_REDUCTIONS
            .iter()
            .map(|(category, actions, coefficient)| {
                (
                    (*category).to_string(),
                    ReductionProfile {
                        actions: actions.iter().map(|a| (*a).to_string()).collect(),
                        coefficient: *coefficient,
                    },
                )
            })
            .collect();
        Self { profiles }
    }

    pub fn profile(&self, category: &str) -> Option<&ReductionProfile> {
        self.profiles.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReductionProfile)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// baseline - reduced_hours * profile coefficient. `None` for a category
    /// with no profile. Signed: a large reduced-usage figure can exceed the baseline.
    pub fn savings(
        &self,
        category: &str,
        baseline_contribution: f64,
        reduced_hours: f64,
    ) -> Option<f64> {
        let profile = self.profile(category)?;
        Some(baseline_contribution - reduced_hours.max(0.0) * profile.coefficient)
    }

    /// Same as [`ReductionCatalog::savings`] with the hours capped at what the
    /// category was actually used for.
    pub fn savings_with_usage(
        &self,
        category: &str,
        baseline_contribution: f64,
        reduced_hours: f64,
        usage_hours: f64,
    ) -> Option<f64> {
        let hours = reduced_hours.clamp(0.0, usage_hours.max(0.0));
        self.savings(category, baseline_contribution, hours)
    }

    /// Savings for a set of plans against a baseline result. Plans on the same
    /// category share one reduced-hours figure (their hours summed, capped at
    /// usage), so each category's baseline is counted once. Plans with zero
    /// hours, an unknown category, or an action the category does not offer
    /// save nothing.
    pub fn plan_savings(
        &self,
        plans: &[ReductionPlan],
        baseline: &EmissionResult,
        usage: &QuantityMap,
    ) -> f64 {
        let mut reduced: BTreeMap<&str, f64> = BTreeMap::new();
        for plan in plans {
            let Some(profile) = self.profile(&plan.category) else {
                warn!(category = %plan.category, "no reduction profile for category");
                continue;
            };
            if !profile.allows(&plan.action) {
                warn!(category = %plan.category, action = %plan.action, "action not offered");
                continue;
            }
            if plan.hours.is_nan() || plan.hours <= 0.0 {
                continue;
            }
            *reduced.entry(plan.category.as_str()).or_insert(0.0) += plan.hours;
        }

        reduced
            .into_iter()
            .filter_map(|(category, hours)| {
                let used = usage.get(category).copied().unwrap_or(0.0);
                self.savings_with_usage(category, baseline.contribution(category), hours, used)
            })
            .sum()
    }
}

const APPLIANCE_REDUCTIONS: &[(&str, &[&str], f64)] = &[
    (
        "Water Heater",
        &[
            "Use less hot water",
            "Use renewable fuels",
            "Use better technology/hybrid with renewables",
        ],
        0.5,
    ),
    ("Air Conditioner", &["Switched off AC", "Increase temperature settings"], 1.25),
    ("Heater", &["Switched off Heater", "Reduced temperature settings"], 1.25),
    ("Television", &["Did not use TV"], 0.088),
    ("Fan", &["Did not use Fan"], 0.032),
    ("Dryer", &["Did not use Dryer"], 1.0),
    ("Coffee Maker", &["Did not use Coffee Maker"], 0.075),
    ("Blender", &["Did not use Blender"], 0.075),
    ("Vacuum Cleaner", &["Did not use Vacuum Cleaner"], 0.15),
    ("Iron", &["Did not use Iron"], 0.1),
    ("Hairdryer", &["Did not use Hairdryer"], 0.15),
    ("Toaster", &["Did not use Toaster"], 0.1),
    ("Electric Kettle", &["Did not use Electric Kettle"], 0.1),
    ("Microwave", &["Did not use Microwave"], 0.2),
    ("Incandescent Light", &["Did not use Incandescent Light"], 0.05),
    ("Dishwasher", &["Did not use Dishwasher", "Did not use Power Dry"], 0.7),
    ("Oven/Stove", &["Did not use Oven/Stove"], 0.3),
    ("Refrigerator", &["Did not use Refrigerator"], 0.22),
    ("Washing Machine", &["Did not use Washing Machine"], 0.75),
    ("Computer/Laptop", &["Did not use Computer/Laptop"], 0.015),
];

/// Food choices priced at a fixed saving rather than through a coefficient table.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "count")]
pub enum LifestyleOption {
    /// Number of low-impact food groups picked (fruits, vegetables, legumes, grains).
    LowImpactFoods(u32),
    LocalSeasonal,
    PlantBased,
}

impl LifestyleOption {
    /// kg CO2 saved.
    pub fn savings(self) -> f64 {
        match self {
            LifestyleOption::LowImpactFoods(n) => f64::from(n) * 0.1,
            LifestyleOption::LocalSeasonal => 0.5,
            LifestyleOption::PlantBased => 1.0,
        }
    }
}

pub fn lifestyle_savings(options: &[LifestyleOption]) -> f64 {
    options.iter().map(|o| o.savings()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::EmissionsAggregator;
    use crate::domain::Domain;
    use crate::table::CoefficientTable;

    const EPS: f64 = 1e-9;

    fn usage(rows: &[(&str, f64)]) -> QuantityMap {
        rows.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn every_profiled_category_has_a_coefficient() {
        let table = CoefficientTable::builtin(Domain::Appliances);
        let catalog = ReductionCatalog::builtin();
        for c in catalog.categories() {
            assert!(table.contains(c), "{c} missing from appliance table");
        }
    }

    #[test]
    fn refrigerator_savings() {
        let catalog = ReductionCatalog::builtin();
        let saved = catalog.savings("Refrigerator", 1.10, 2.0).unwrap();
        assert!((saved - (1.10 - 0.44)).abs() < EPS);
        assert!(catalog.savings("Lava Lamp", 1.0, 1.0).is_none());
    }

    #[test]
    fn reduced_hours_capped_at_usage() {
        let catalog = ReductionCatalog::builtin();
        let capped = catalog.savings_with_usage("Dryer", 2.0, 10.0, 2.0).unwrap();
        assert!((capped - 0.0).abs() < EPS);
    }

    #[test]
    fn plan_savings_skips_invalid_plans() {
        let agg = EmissionsAggregator::builtin(Domain::Appliances);
        let used = usage(&[("Television", 4.0), ("Heater", 3.0)]);
        let baseline = agg.result(["Television", "Heater"], &used);
        let catalog = ReductionCatalog::builtin();

        let plans = vec![
            ReductionPlan {
                category: "Television".into(),
                action: "Did not use TV".into(),
                hours: 1.0,
            },
            ReductionPlan {
                category: "Heater".into(),
                action: "Did not use TV".into(),
                hours: 1.0,
            },
            ReductionPlan {
                category: "Heater".into(),
                action: "Switched off Heater".into(),
                hours: 0.0,
            },
        ];
        let saved = catalog.plan_savings(&plans, &baseline, &used);
        assert!((saved - (4.0 * 0.088 - 0.088)).abs() < EPS);
    }

    #[test]
    fn two_actions_on_one_appliance_count_baseline_once() {
        let agg = EmissionsAggregator::builtin(Domain::Appliances);
        let used = usage(&[("Heater", 3.0)]);
        let baseline = agg.result(["Heater"], &used);
        let catalog = ReductionCatalog::builtin();

        let plans = vec![
            ReductionPlan {
                category: "Heater".into(),
                action: "Switched off Heater".into(),
                hours: 1.0,
            },
            ReductionPlan {
                category: "Heater".into(),
                action: "Reduced temperature settings".into(),
                hours: 1.0,
            },
        ];
        let saved = catalog.plan_savings(&plans, &baseline, &used);
        assert!(saved <= baseline.total);
        assert!((saved - (3.75 - 2.0 * 1.25)).abs() < EPS);
    }

    #[test]
    fn combined_hours_capped_at_usage() {
        let agg = EmissionsAggregator::builtin(Domain::Appliances);
        let used = usage(&[("Dishwasher", 1.0)]);
        let baseline = agg.result(["Dishwasher"], &used);
        let plans = vec![
            ReductionPlan {
                category: "Dishwasher".into(),
                action: "Did not use Dishwasher".into(),
                hours: 1.0,
            },
            ReductionPlan {
                category: "Dishwasher".into(),
                action: "Did not use Power Dry".into(),
                hours: 1.0,
            },
        ];
        let saved = ReductionCatalog::builtin().plan_savings(&plans, &baseline, &used);
        assert!((saved - 0.0).abs() < EPS);
    }

    #[test]
    fn dishwasher_offers_two_actions() {
        let catalog = ReductionCatalog::builtin();
        let p = catalog.profile("Dishwasher").unwrap();
        assert!(p.allows("Did not use Power Dry"));
        assert!(!p.allows("Switched off AC"));
    }

    #[test]
    fn lifestyle_option_values() {
        let total = lifestyle_savings(&[
            LifestyleOption::LowImpactFoods(3),
            LifestyleOption::LocalSeasonal,
            LifestyleOption::PlantBased,
        ]);
        assert!((total - 1.8).abs() < EPS);
        assert_eq!(lifestyle_savings(&[]), 0.0);
    }
}
