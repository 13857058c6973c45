use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregator::QuantityMap;
use crate::config::FootprintConfig;
use crate::domain::Domain;
use crate::error::FootprintError;
use crate::footprint::{DailyFootprint, DomainSummary};
use crate::guard::QuantityGuard;
use crate::reduction::{lifestyle_savings, LifestyleOption, ReductionPlan};

/// A what-if selection to compare the baseline against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub selection: Vec<String>,
    #[serde(default)]
    pub quantities: QuantityMap,
}

impl Alternative {
    /// One unit of each selected category, the way low-impact food swaps are counted.
    pub fn one_each<I, S>(selection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selection: Vec<String> = selection.into_iter().map(Into::into).collect();
        let quantities = selection.iter().map(|c| (c.clone(), 1.0)).collect();
        Self {
            selection,
            quantities,
        }
    }
}

/// User input for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainInput {
    pub domain: Domain,
    pub selection: Vec<String>,
    #[serde(default)]
    pub quantities: QuantityMap,
    #[serde(default)]
    pub alternative: Option<Alternative>,
    #[serde(default)]
    pub reductions: Vec<ReductionPlan>,
    #[serde(default)]
    pub lifestyle: Vec<LifestyleOption>,
}

/// A day's worth of input across domains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub inputs: Vec<DomainInput>,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, FootprintError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FootprintError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FootprintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Lenient evaluation: unknown categories, missing or negative quantities
    /// all fall back to zero. Fails only when a domain is not configured.
    pub fn evaluate(&self, config: &FootprintConfig) -> Result<DailyFootprint, FootprintError> {
        let mut summaries = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let domain_config = config.domain(input.domain)?;
            let aggregator = domain_config.aggregator();
            let mut summary =
                DomainSummary::evaluate(&aggregator, &input.selection, &input.quantities, None);
            if let Some(alt) = &input.alternative {
                summary = summary.compared_with(
                    &domain_config.alternative_aggregator(),
                    &alt.selection,
                    &alt.quantities,
                );
            }
            let planned = domain_config.reductions.plan_savings(
                &input.reductions,
                &summary.baseline,
                &input.quantities,
            );
            let extra = planned + lifestyle_savings(&input.lifestyle);
            summaries.push(summary.with_extra_savings(extra));
        }
        Ok(DailyFootprint::from_summaries(summaries))
    }

    /// Strict evaluation: every selection, quantity and reduction plan must
    /// pass [`QuantityGuard`] first.
    pub fn evaluate_strict(
        &self,
        config: &FootprintConfig,
    ) -> Result<DailyFootprint, FootprintError> {
        for input in &self.inputs {
            let domain_config = config.domain(input.domain)?;
            QuantityGuard::validate_selection(
                &domain_config.aggregator(),
                &input.selection,
                &input.quantities,
            )?;
            if let Some(alt) = &input.alternative {
                QuantityGuard::validate_selection(
                    &domain_config.alternative_aggregator(),
                    &alt.selection,
                    &alt.quantities,
                )?;
            }
            QuantityGuard::validate_plans(&domain_config.reductions, &input.reductions)?;
        }
        self.evaluate(config)
    }

    /// A small worked day used by the binary when no scenario file is given.
    pub fn demo() -> Self {
        fn q(rows: &[(&str, f64)]) -> QuantityMap {
            rows.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
        }
        fn s(names: &[&str]) -> Vec<String> {
            names.iter().map(|n| (*n).to_string()).collect()
        }

        Scenario {
            inputs: vec![
                DomainInput {
                    domain: Domain::Commute,
                    selection: s(&["Car", "Bus"]),
                    quantities: q(&[("Car", 12.0), ("Bus", 4.0)]),
                    alternative: Some(Alternative {
                        selection: s(&["Bicycle", "Train"]),
                        quantities: q(&[("Bicycle", 4.0), ("Train", 12.0)]),
                    }),
                    reductions: Vec::new(),
                    lifestyle: Vec::new(),
                },
                DomainInput {
                    domain: Domain::Food,
                    selection: s(&["Beef", "Rice", "Berries"]),
                    quantities: q(&[("Beef", 1.0), ("Rice", 2.0), ("Berries", 1.0)]),
                    alternative: Some(Alternative {
                        selection: s(&["Legumes", "Rice", "Berries"]),
                        quantities: q(&[("Legumes", 1.0), ("Rice", 2.0), ("Berries", 1.0)]),
                    }),
                    reductions: Vec::new(),
                    lifestyle: vec![LifestyleOption::LocalSeasonal],
                },
                DomainInput {
                    domain: Domain::Appliances,
                    selection: s(&["Refrigerator", "Television", "Air Conditioner"]),
                    quantities: q(&[
                        ("Refrigerator", 24.0),
                        ("Television", 3.0),
                        ("Air Conditioner", 4.0),
                    ]),
                    alternative: None,
                    reductions: vec![ReductionPlan {
                        category: "Air Conditioner".into(),
                        action: "Switched off AC".into(),
                        hours: 2.0,
                    }],
                    lifestyle: Vec::new(),
                },
            ],
        }
    }
}
