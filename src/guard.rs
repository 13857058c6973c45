use crate::aggregator::{EmissionsAggregator, QuantityMap};
use crate::error::FootprintError;
use crate::reduction::{ReductionCatalog, ReductionPlan};

/// Strict input checks for callers that want rejection instead of the
/// aggregator's zero fallbacks.
pub struct QuantityGuard;

impl QuantityGuard {
    /// Every quantity must be finite and >= 0.
    pub fn validate(quantities: &QuantityMap) -> Result<(), FootprintError> {
        for (category, &value) in quantities {
            if !value.is_finite() || value < 0.0 {
                return Err(FootprintError::NegativeQuantity {
                    category: category.clone(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Quantities keyed only by selected categories, and selected categories
    /// all present in the aggregator's table.
    pub fn validate_selection(
        aggregator: &EmissionsAggregator,
        selection: &[String],
        quantities: &QuantityMap,
    ) -> Result<(), FootprintError> {
        Self::validate(quantities)?;
        for category in selection {
            if !aggregator.table.contains(category) {
                return Err(FootprintError::UnknownCategory {
                    domain: aggregator.domain,
                    category: category.clone(),
                });
            }
        }
        for category in quantities.keys() {
            if !selection.contains(category) {
                return Err(FootprintError::UnselectedQuantity(category.clone()));
            }
        }
        Ok(())
    }

    /// Each plan names a profiled category, an action that category offers,
    /// and finite, non-negative hours.
    pub fn validate_plans(
        catalog: &ReductionCatalog,
        plans: &[ReductionPlan],
    ) -> Result<(), FootprintError> {
        for plan in plans {
            let profile = catalog
                .profile(&plan.category)
                .ok_or_else(|| FootprintError::NoReductionProfile(plan.category.clone()))?;
            if !profile.allows(&plan.action) {
                return Err(FootprintError::ActionNotOffered {
                    category: plan.category.clone(),
                    action: plan.action.clone(),
                });
            }
            if !plan.hours.is_finite() || plan.hours < 0.0 {
                return Err(FootprintError::NegativeQuantity {
                    category: plan.category.clone(),
                    value: plan.hours,
                });
            }
        }
        Ok(())
    }
}
