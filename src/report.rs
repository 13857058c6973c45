//! Presentation boundary. The only place values are rounded.

use std::fmt;

use crate::footprint::{DailyFootprint, DomainSummary};

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl fmt::Display for DomainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.domain)?;
        for (category, kg) in self.baseline.ranked() {
            writeln!(f, "  {category}: {:.2} kg", round2(kg))?;
        }
        write!(f, "  total: {:.2} kg", round2(self.baseline.total))?;
        if let Some(alt) = self.alternative_total {
            write!(f, "\n  alternative: {:.2} kg", round2(alt))?;
        }
        write!(f, "\n  saved: {:.2} kg", round2(self.saved))
    }
}

impl fmt::Display for DailyFootprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.domains {
            writeln!(f, "{summary}")?;
        }
        writeln!(f, "total CO2 emissions: {:.2} kg", round2(self.total))?;
        write!(f, "total CO2 saved: {:.2} kg", round2(self.saved))
    }
}
