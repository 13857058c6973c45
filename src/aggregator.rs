//! Weighted-sum emission operators: contribution = quantity * coefficient / divisor.
//!
//! All values returned here are unrounded. Rounding for display lives in
//! [`crate::report`], so totals never accumulate rounding error.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::Domain;
use crate::table::CoefficientTable;

/// User-entered quantity per selected category (miles, servings, grams or hours).
pub type QuantityMap = BTreeMap<String, f64>;

/// Per-category contributions plus their sum, in kg CO2.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub contributions: BTreeMap<String, f64>,
    pub total: f64,
}

impl EmissionResult {
    pub fn contribution(&self, category: &str) -> f64 {
        self.contributions.get(category).copied().unwrap_or(0.0)
    }

    /// Contributions sorted largest first, ties broken by name.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .contributions
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}

/// CO2 attributable to one category. Unknown categories contribute zero,
/// negative or NaN quantities are clamped to zero, and a divisor that is not
/// a positive finite number yields zero.
pub fn compute_contribution(
    category: &str,
    quantity: f64,
    table: &CoefficientTable,
    unit_divisor: f64,
) -> f64 {
    let Some(coefficient) = table.coefficient(category) else {
        debug!(category, "category not in coefficient table, contributing 0");
        return 0.0;
    };
    if !unit_divisor.is_finite() || unit_divisor <= 0.0 {
        warn!(category, unit_divisor, "invalid unit divisor, contributing 0");
        return 0.0;
    }
    let quantity = if quantity.is_nan() || quantity < 0.0 {
        warn!(category, quantity, "negative quantity clamped to 0");
        0.0
    } else {
        quantity
    };
    quantity * coefficient / unit_divisor
}

/// Per-category contributions and total for a selection. Duplicate names in
/// the selection count once; selected categories without a quantity count as zero.
pub fn compute_result<I, S>(
    selection: I,
    quantities: &QuantityMap,
    table: &CoefficientTable,
    unit_divisor: f64,
) -> EmissionResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let selected: BTreeSet<String> = selection
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();

    let contributions: BTreeMap<String, f64> = selected
        .into_iter()
        .map(|category| {
            let quantity = quantities.get(&category).copied().unwrap_or(0.0);
            let c = compute_contribution(&category, quantity, table, unit_divisor);
            debug!(category = %category, quantity, contribution = c, "computed contribution");
            (category, c)
        })
        .collect();

    let total = contributions.values().sum();
    EmissionResult {
        contributions,
        total,
    }
}

/// Sum of contributions over the selection; 0 for an empty selection.
pub fn compute_total<I, S>(
    selection: I,
    quantities: &QuantityMap,
    table: &CoefficientTable,
    unit_divisor: f64,
) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    compute_result(selection, quantities, table, unit_divisor).total
}

/// Baseline total minus the alternative scenario's total. Negative when the
/// alternative emits more; never clamped.
pub fn compute_savings<I, S>(
    baseline_total: f64,
    alternative_selection: I,
    alternative_quantities: &QuantityMap,
    table: &CoefficientTable,
    unit_divisor: f64,
) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    baseline_total
        - compute_total(
            alternative_selection,
            alternative_quantities,
            table,
            unit_divisor,
        )
}

/// A coefficient table bound to its domain and unit divisor.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionsAggregator {
    pub domain: Domain,
    pub table: CoefficientTable,
    pub unit_divisor: f64,
}

impl EmissionsAggregator {
    pub fn new(domain: Domain, table: CoefficientTable, unit_divisor: f64) -> Self {
        Self {
            domain,
            table,
            unit_divisor,
        }
    }

    /// Canonical table with the domain's default divisor.
    pub fn builtin(domain: Domain) -> Self {
        Self::new(
            domain,
            CoefficientTable::builtin(domain),
            domain.default_divisor(),
        )
    }

    pub fn contribution(&self, category: &str, quantity: f64) -> f64 {
        compute_contribution(category, quantity, &self.table, self.unit_divisor)
    }

    pub fn result<I, S>(&self, selection: I, quantities: &QuantityMap) -> EmissionResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        compute_result(selection, quantities, &self.table, self.unit_divisor)
    }

    pub fn total<I, S>(&self, selection: I, quantities: &QuantityMap) -> f64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        compute_total(selection, quantities, &self.table, self.unit_divisor)
    }

    pub fn savings<I, S>(
        &self,
        baseline_total: f64,
        alternative_selection: I,
        alternative_quantities: &QuantityMap,
    ) -> f64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        compute_savings(
            baseline_total,
            alternative_selection,
            alternative_quantities,
            &self.table,
            self.unit_divisor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GRAMS_PER_SERVING;

    const EPS: f64 = 1e-9;

    fn table(rows: &[(&str, f64)]) -> CoefficientTable {
        CoefficientTable::new(rows.iter().copied()).unwrap()
    }

    fn quantities(rows: &[(&str, f64)]) -> QuantityMap {
        rows.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn unknown_category_contributes_zero() {
        let t = table(&[("Car", 0.404)]);
        for q in [0.0, 1.0, 1e6, -3.0] {
            assert_eq!(compute_contribution("Hovercraft", q, &t, 1.0), 0.0);
        }
    }

    #[test]
    fn contribution_is_quantity_times_coefficient_over_divisor() {
        let t = table(&[("Chicken", 0.45)]);
        let c = compute_contribution("Chicken", 125.0, &t, GRAMS_PER_SERVING);
        assert!((c - 125.0 * 0.45 / 250.0).abs() < EPS);
    }

    #[test]
    fn empty_selection_totals_zero() {
        let t = CoefficientTable::builtin(Domain::Commute);
        let none: [&str; 0] = [];
        assert_eq!(compute_total(none, &QuantityMap::new(), &t, 1.0), 0.0);
    }

    #[test]
    fn total_ignores_selection_order() {
        let t = CoefficientTable::builtin(Domain::Commute);
        let q = quantities(&[("Car", 12.5), ("Bus", 3.0), ("Train", 40.0)]);
        let a = compute_total(["Car", "Bus", "Train"], &q, &t, 1.0);
        let b = compute_total(["Train", "Car", "Bus"], &q, &t, 1.0);
        assert!((a - b).abs() < EPS);
    }

    #[test]
    fn missing_quantity_counts_as_zero() {
        let t = table(&[("Car", 0.404), ("Bus", 0.299)]);
        let q = quantities(&[("Car", 10.0)]);
        let r = compute_result(["Car", "Bus"], &q, &t, 1.0);
        assert_eq!(r.contribution("Bus"), 0.0);
        assert!((r.total - 4.04).abs() < EPS);
    }

    #[test]
    fn duplicate_selection_counts_once() {
        let t = table(&[("Car", 0.404)]);
        let q = quantities(&[("Car", 10.0)]);
        let total = compute_total(["Car", "Car"], &q, &t, 1.0);
        assert!((total - 4.04).abs() < EPS);
    }

    #[test]
    fn negative_quantity_and_bad_divisor_fall_back_to_zero() {
        let t = table(&[("Car", 0.404)]);
        assert_eq!(compute_contribution("Car", -5.0, &t, 1.0), 0.0);
        assert_eq!(compute_contribution("Car", f64::NAN, &t, 1.0), 0.0);
        assert_eq!(compute_contribution("Car", 5.0, &t, 0.0), 0.0);
        assert_eq!(compute_contribution("Car", 5.0, &t, f64::INFINITY), 0.0);
    }

    #[test]
    fn commute_car_scenario() {
        let agg = EmissionsAggregator::new(Domain::Commute, table(&[("Car", 0.404)]), 1.0);
        let r = agg.result(["Car"], &quantities(&[("Car", 10.0)]));
        assert!((r.contribution("Car") - 4.04).abs() < EPS);
        assert!((r.total - 4.04).abs() < EPS);
    }

    #[test]
    fn food_beef_scenario() {
        let agg = EmissionsAggregator::new(Domain::Food, table(&[("Beef", 15.5)]), 1.0);
        assert!((agg.contribution("Beef", 2.0) - 31.0).abs() < EPS);
    }

    #[test]
    fn appliance_refrigerator_savings_scenario() {
        let agg = EmissionsAggregator::builtin(Domain::Appliances);
        let base = agg.total(["Refrigerator"], &quantities(&[("Refrigerator", 5.0)]));
        assert!((base - 1.10).abs() < EPS);

        let alt = table(&[("Standby", 0.5)]);
        let saved = compute_savings(base, ["Standby"], &quantities(&[("Standby", 1.0)]), &alt, 1.0);
        assert!((saved - 0.60).abs() < EPS);
    }

    #[test]
    fn savings_can_be_negative() {
        let agg = EmissionsAggregator::builtin(Domain::Commute);
        let base = agg.total(["Bicycle"], &quantities(&[("Bicycle", 10.0)]));
        let saved = agg.savings(base, ["Car"], &quantities(&[("Car", 10.0)]));
        assert!(saved < 0.0);
        assert!((saved - (0.02 - 4.04)).abs() < EPS);
    }

    #[test]
    fn ranked_sorts_descending_then_by_name() {
        let agg = EmissionsAggregator::builtin(Domain::Appliances);
        let q = quantities(&[("Heater", 2.0), ("Air Conditioner", 2.0), ("Fan", 1.0)]);
        let r = agg.result(["Fan", "Heater", "Air Conditioner"], &q);
        let names: Vec<_> = r.ranked().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Air Conditioner", "Heater", "Fan"]);
    }
}
