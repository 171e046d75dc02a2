//! Risk / issue register values.
//!
//! A *risk* is something that may go wrong and is curated by the project
//! owner; an *issue* is something that already went wrong and any project
//! member may report it. The distinction drives authorization, see
//! [`crate::access`].

use serde::{Deserialize, Serialize};

pub const TYPE_RISK: &str = "risk";
pub const TYPE_ISSUE: &str = "issue";

pub const VALID_TYPES: &[&str] = &[TYPE_RISK, TYPE_ISSUE];

pub const IMPACT_LOW: &str = "low";
pub const IMPACT_MEDIUM: &str = "medium";
pub const IMPACT_HIGH: &str = "high";

pub const VALID_IMPACT_LEVELS: &[&str] = &[IMPACT_LOW, IMPACT_MEDIUM, IMPACT_HIGH];

/// Impact level stored when the reporter does not give one.
pub const DEFAULT_IMPACT_LEVEL: &str = IMPACT_MEDIUM;

pub const STATUS_OPEN: &str = "open";
pub const STATUS_MITIGATED: &str = "mitigated";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_CLOSED: &str = "closed";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_MITIGATED,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

/// Status every new entry starts in.
pub const DEFAULT_STATUS: &str = STATUS_OPEN;

/// The two kinds of register entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskIssueKind {
    Risk,
    Issue,
}

impl RiskIssueKind {
    /// Parse the stored/requested string form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            TYPE_RISK => Some(Self::Risk),
            TYPE_ISSUE => Some(Self::Issue),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Risk => TYPE_RISK,
            Self::Issue => TYPE_ISSUE,
        }
    }
}

pub fn validate_type(value: &str) -> Result<(), String> {
    crate::validation::validate_one_of(value, VALID_TYPES, "type")
}

pub fn validate_impact_level(value: &str) -> Result<(), String> {
    crate::validation::validate_one_of(value, VALID_IMPACT_LEVELS, "impact level")
}

pub fn validate_status(value: &str) -> Result<(), String> {
    crate::validation::validate_one_of(value, VALID_STATUSES, "status")
}
