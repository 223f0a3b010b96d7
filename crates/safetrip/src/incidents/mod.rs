//! Severity/type filtering over the incident map catalog.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::assessment::AssessmentError;
use crate::catalog::{IncidentRecord, Severity};

const ALL: &str = "ALL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    pub fn matches(&self, severity: Severity) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(expected) => *expected == severity,
        }
    }
}

impl FromStr for SeverityFilter {
    type Err = AssessmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(SeverityFilter::All);
        }
        trimmed.parse().map(SeverityFilter::Only)
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityFilter::All => f.write_str(ALL),
            SeverityFilter::Only(severity) => write!(f, "{severity}"),
        }
    }
}

/// Incident type constraint. Type names are compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub fn matches(&self, kind: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(expected) => expected == kind,
        }
    }
}

impl From<&str> for TypeFilter {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            TypeFilter::All
        } else {
            TypeFilter::Only(trimmed.to_string())
        }
    }
}

impl FromStr for TypeFilter {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(TypeFilter::from(value))
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str(ALL),
            TypeFilter::Only(kind) => f.write_str(kind),
        }
    }
}

/// Incidents matching both filters, in catalog order.
pub fn filter_incidents<'a>(
    incidents: &'a [IncidentRecord],
    severity: SeverityFilter,
    kind: &TypeFilter,
) -> Vec<&'a IncidentRecord> {
    incidents
        .iter()
        .filter(|incident| severity.matches(incident.severity) && kind.matches(&incident.kind))
        .collect()
}

/// Incident types present in the catalog, de-duplicated in order of first appearance.
pub fn distinct_types(incidents: &[IncidentRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    incidents
        .iter()
        .map(|incident| incident.kind.as_str())
        .filter(|kind| seen.insert(*kind))
        .collect()
}

/// Filtered incidents together with the counts behind "Showing X of Y incidents".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentSelection {
    pub severity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub shown: usize,
    pub total: usize,
    pub incidents: Vec<IncidentRecord>,
}

pub fn select_incidents(
    incidents: &[IncidentRecord],
    severity: SeverityFilter,
    kind: &TypeFilter,
) -> IncidentSelection {
    let matching: Vec<IncidentRecord> = filter_incidents(incidents, severity, kind)
        .into_iter()
        .cloned()
        .collect();

    IncidentSelection {
        severity: severity.to_string(),
        kind: kind.to_string(),
        shown: matching.len(),
        total: incidents.len(),
        incidents: matching,
    }
}
