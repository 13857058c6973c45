use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregator::EmissionsAggregator;
use crate::domain::Domain;
use crate::error::FootprintError;
use crate::reduction::ReductionCatalog;
use crate::table::CoefficientTable;

/// Coefficients and scaling for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub domain: Domain,
    /// Falls back to the domain default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_divisor: Option<f64>,
    pub coefficients: CoefficientTable,
    /// Extra categories an alternative scenario may pick from, on top of `coefficients`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_coefficients: Option<CoefficientTable>,
    #[serde(default, skip_serializing_if = "ReductionCatalog::is_empty")]
    pub reductions: ReductionCatalog,
}

impl DomainConfig {
    pub fn divisor(&self) -> f64 {
        self.unit_divisor
            .unwrap_or_else(|| self.domain.default_divisor())
    }

    pub fn aggregator(&self) -> EmissionsAggregator {
        EmissionsAggregator::new(self.domain, self.coefficients.clone(), self.divisor())
    }

    /// Aggregator for pricing an alternative: the domain table plus any
    /// alternative-only entries.
    pub fn alternative_aggregator(&self) -> EmissionsAggregator {
        let table = match &self.alternative_coefficients {
            Some(extra) => self.coefficients.merged(extra),
            None => self.coefficients.clone(),
        };
        EmissionsAggregator::new(self.domain, table, self.divisor())
    }
}

/// One canonical table per domain, loaded from JSON or built in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintConfig {
    pub domains: Vec<DomainConfig>,
}

impl FootprintConfig {
    pub fn builtin() -> Self {
        let domains = Domain::ALL
            .into_iter()
            .map(|domain| DomainConfig {
                domain,
                unit_divisor: Some(domain.default_divisor()),
                coefficients: CoefficientTable::builtin(domain),
                alternative_coefficients: match domain {
                    Domain::Food => Some(CoefficientTable::low_impact_foods()),
                    Domain::Commute | Domain::Appliances => None,
                },
                reductions: match domain {
                    Domain::Appliances => ReductionCatalog::builtin(),
                    Domain::Commute | Domain::Food => ReductionCatalog::default(),
                },
            })
            .collect();
        Self { domains }
    }

    pub fn from_json_str(json: &str) -> Result<Self, FootprintError> {
        let config: FootprintConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FootprintError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FootprintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), domains = config.domains.len(), "loaded config");
        config.flag_discrepancies();
        Ok(config)
    }

    /// Divisors positive and finite, reduction coefficients finite and >= 0,
    /// each domain at most once.
    pub fn validate(&self) -> Result<(), FootprintError> {
        let mut seen = BTreeSet::new();
        for d in &self.domains {
            if !seen.insert(d.domain) {
                return Err(FootprintError::DuplicateDomain(d.domain));
            }
            let divisor = d.divisor();
            if !divisor.is_finite() || divisor <= 0.0 {
                return Err(FootprintError::InvalidDivisor {
                    domain: d.domain,
                    value: divisor,
                });
            }
            for (category, profile) in d.reductions.iter() {
                let value = profile.coefficient;
                if !value.is_finite() || value < 0.0 {
                    return Err(FootprintError::NegativeCoefficient {
                        category: category.to_string(),
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn domain(&self, domain: Domain) -> Result<&DomainConfig, FootprintError> {
        self.domains
            .iter()
            .find(|d| d.domain == domain)
            .ok_or(FootprintError::MissingDomain(domain))
    }

    pub fn aggregator(&self, domain: Domain) -> Result<EmissionsAggregator, FootprintError> {
        self.domain(domain).map(DomainConfig::aggregator)
    }

    /// Log every category where a loaded table disagrees with the built-in one.
    /// Returns how many were found.
    pub fn flag_discrepancies(&self) -> usize {
        let mut count = 0;
        for d in &self.domains {
            let builtin = CoefficientTable::builtin(d.domain);
            for diff in d.coefficients.discrepancies(&builtin) {
                warn!(
                    domain = %d.domain,
                    category = %diff.category,
                    configured = ?diff.ours,
                    builtin = ?diff.theirs,
                    "coefficient differs from built-in table"
                );
                count += 1;
            }
        }
        count
    }
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
