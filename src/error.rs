use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Domain;

/// Errors raised at the configuration and validation boundary.
/// The aggregation operators themselves never fail; they fall back to zero.
#[derive(Debug, Error)]
pub enum FootprintError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("coefficient for {category} must be finite and >= 0, got {value}")]
    NegativeCoefficient { category: String, value: f64 },
    #[error("unit divisor for {domain} must be finite and > 0, got {value}")]
    InvalidDivisor { domain: Domain, value: f64 },
    #[error("domain {0} configured more than once")]
    DuplicateDomain(Domain),
    #[error("domain {0} missing from configuration")]
    MissingDomain(Domain),
    #[error("quantity for {category} must be >= 0, got {value}")]
    NegativeQuantity { category: String, value: f64 },
    #[error("{category} is not in the {domain} coefficient table")]
    UnknownCategory { domain: Domain, category: String },
    #[error("quantity supplied for {0}, which is not selected")]
    UnselectedQuantity(String),
    #[error("no reduction actions are defined for {0}")]
    NoReductionProfile(String),
    #[error("{category} does not offer the action \"{action}\"")]
    ActionNotOffered { category: String, action: String },
    #[error("unknown domain: {0}")]
    UnknownDomain(String),
}
