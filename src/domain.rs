use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FootprintError;

/// Activity domain. Each domain owns one coefficient table and one unit divisor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Commute,
    Food,
    Appliances,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Commute, Domain::Food, Domain::Appliances];

    /// Unit the user enters quantities in.
    pub fn quantity_unit(self) -> &'static str {
        match self {
            Domain::Commute => "miles",
            Domain::Food => "servings",
            Domain::Appliances => "hours",
        }
    }

    pub fn coefficient_unit(self) -> &'static str {
        match self {
            Domain::Commute => "kg CO2/mile",
            Domain::Food => "kg CO2/serving",
            Domain::Appliances => "kg CO2/hour",
        }
    }

    /// Divisor paired with the canonical table. Food is per-serving here;
    /// the legacy per-250 g food table uses [`GRAMS_PER_SERVING`].
    pub fn default_divisor(self) -> f64 {
        match self {
            Domain::Commute | Domain::Food | Domain::Appliances => 1.0,
        }
    }
}

/// Grams in one reference serving for gram-based food quantities.
pub const GRAMS_PER_SERVING: f64 = 250.0;

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::Commute => "commute",
            Domain::Food => "food",
            Domain::Appliances => "appliances",
        };
        f.write_str(name)
    }
}

impl FromStr for Domain {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commute" => Ok(Domain::Commute),
            "food" => Ok(Domain::Food),
            "appliances" | "appliance" => Ok(Domain::Appliances),
            other => Err(FootprintError::UnknownDomain(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_agree() {
        for d in Domain::ALL {
            let parsed: Domain = d.to_string().parse().unwrap();
            assert_eq!(parsed, d);
        }
        assert_eq!("Appliance".parse::<Domain>().unwrap(), Domain::Appliances);
    }

    #[test]
    fn unknown_domain_is_rejected() {
        let err = "transport".parse::<Domain>().unwrap_err();
        assert!(matches!(err, FootprintError::UnknownDomain(ref s) if s == "transport"));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Domain::Appliances).unwrap();
        assert_eq!(json, "\"appliances\"");
    }
}
