use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregator::{EmissionResult, EmissionsAggregator, QuantityMap};
use crate::domain::Domain;

/// Outcome for one domain: the baseline result plus any savings the caller priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub domain: Domain,
    pub baseline: EmissionResult,
    /// Total of the alternative scenario, when one was given.
    pub alternative_total: Option<f64>,
    /// Signed savings. Zero when nothing was compared.
    pub saved: f64,
}

impl DomainSummary {
    pub fn baseline_only(domain: Domain, baseline: EmissionResult) -> Self {
        Self {
            domain,
            baseline,
            alternative_total: None,
            saved: 0.0,
        }
    }

    /// Evaluate a baseline selection and, optionally, an alternative one
    /// priced with the same aggregator.
    pub fn evaluate(
        aggregator: &EmissionsAggregator,
        selection: &[String],
        quantities: &QuantityMap,
        alternative: Option<(&[String], &QuantityMap)>,
    ) -> Self {
        let baseline = aggregator.result(selection, quantities);
        let summary = Self::baseline_only(aggregator.domain, baseline);
        let summary = match alternative {
            Some((sel, q)) => summary.compared_with(aggregator, sel, q),
            None => summary,
        };
        info!(
            domain = %aggregator.domain,
            total = summary.baseline.total,
            saved = summary.saved,
            "domain evaluated"
        );
        summary
    }

    /// Price an alternative with its own aggregator and add baseline minus
    /// alternative to the recorded savings.
    pub fn compared_with(
        mut self,
        aggregator: &EmissionsAggregator,
        selection: &[String],
        quantities: &QuantityMap,
    ) -> Self {
        let alternative = aggregator.total(selection, quantities);
        debug!(domain = %self.domain, alternative, "alternative priced");
        self.saved += self.baseline.total - alternative;
        self.alternative_total = Some(alternative);
        self
    }

    pub fn total(&self) -> f64 {
        self.baseline.total
    }

    /// Fold extra savings (reduction plans, lifestyle options) into this domain.
    pub fn with_extra_savings(mut self, extra: f64) -> Self {
        self.saved += extra;
        self
    }
}

/// Totals across domains, reduced from per-domain summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyFootprint {
    pub domains: Vec<DomainSummary>,
    pub total: f64,
    pub saved: f64,
}

impl DailyFootprint {
    pub fn from_summaries<I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = DomainSummary>,
    {
        let domains: Vec<DomainSummary> = summaries.into_iter().collect();
        let total = domains.iter().map(DomainSummary::total).sum();
        let saved = domains.iter().map(|d| d.saved).sum();
        Self {
            domains,
            total,
            saved,
        }
    }

    pub fn domain(&self, domain: Domain) -> Option<&DomainSummary> {
        self.domains.iter().find(|d| d.domain == domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CoefficientTable;

    const EPS: f64 = 1e-9;

    fn q(rows: &[(&str, f64)]) -> QuantityMap {
        rows.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    fn s(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn evaluate_without_alternative_saves_nothing() {
        let agg = EmissionsAggregator::builtin(Domain::Commute);
        let summary = DomainSummary::evaluate(&agg, &s(&["Car"]), &q(&[("Car", 10.0)]), None);
        assert!((summary.total() - 4.04).abs() < EPS);
        assert_eq!(summary.saved, 0.0);
        assert!(summary.alternative_total.is_none());
    }

    #[test]
    fn evaluate_with_alternative() {
        let agg = EmissionsAggregator::builtin(Domain::Commute);
        let alt_sel = s(&["Bicycle"]);
        let alt_q = q(&[("Bicycle", 10.0)]);
        let summary = DomainSummary::evaluate(
            &agg,
            &s(&["Car"]),
            &q(&[("Car", 10.0)]),
            Some((alt_sel.as_slice(), &alt_q)),
        );
        assert!((summary.saved - 4.02).abs() < EPS);
    }

    #[test]
    fn alternative_priced_with_its_own_table() {
        let baseline = EmissionsAggregator::builtin(Domain::Food);
        let low_impact = EmissionsAggregator::new(
            Domain::Food,
            CoefficientTable::builtin(Domain::Food).merged(&CoefficientTable::low_impact_foods()),
            1.0,
        );
        let alt_sel = s(&["Legumes", "Nuts"]);
        let alt_q = q(&[("Legumes", 1.0), ("Nuts", 1.0)]);
        let summary = DomainSummary::evaluate(&baseline, &s(&["Beef"]), &q(&[("Beef", 1.0)]), None)
            .compared_with(&low_impact, &alt_sel, &alt_q);
        assert!((summary.alternative_total.unwrap() - 0.081).abs() < EPS);
        assert!((summary.saved - (15.5 - 0.081)).abs() < EPS);

        // The baseline table alone has no price for these swaps.
        let same_table = DomainSummary::evaluate(
            &baseline,
            &s(&["Beef"]),
            &q(&[("Beef", 1.0)]),
            Some((alt_sel.as_slice(), &alt_q)),
        );
        assert!((same_table.saved - 15.5).abs() < EPS);
    }

    #[test]
    fn daily_footprint_sums_domains() {
        let commute = DomainSummary::evaluate(
            &EmissionsAggregator::builtin(Domain::Commute),
            &s(&["Car"]),
            &q(&[("Car", 10.0)]),
            None,
        );
        let food = DomainSummary::evaluate(
            &EmissionsAggregator::builtin(Domain::Food),
            &s(&["Beef"]),
            &q(&[("Beef", 2.0)]),
            None,
        )
        .with_extra_savings(1.0);
        let day = DailyFootprint::from_summaries([commute, food]);
        assert!((day.total - 35.04).abs() < EPS);
        assert!((day.saved - 1.0).abs() < EPS);
        assert!(day.domain(Domain::Food).is_some());
        assert!(day.domain(Domain::Appliances).is_none());
    }

    #[test]
    fn empty_day_is_zero() {
        let day = DailyFootprint::from_summaries(Vec::new());
        assert_eq!(day.total, 0.0);
        assert_eq!(day.saved, 0.0);
    }
}
