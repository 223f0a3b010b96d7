use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assessment::AssessmentError;

/// Identifier of a quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

/// Identifier of a checklist item, unique across every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(pub u32);

macro_rules! display_id {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        })*
    };
}

display_id!(QuestionId, ItemId, ZoneId, IncidentId);

/// Red-flag question asked by the partner-travel quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub text: String,
    pub weight: u32,
}

/// Yes/no safety question from the pre-travel checklist.
///
/// A negative answer counts against the traveller; `critical` items weigh more heavily
/// in the classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ItemId,
    pub text: String,
    pub critical: bool,
    pub explanation: String,
}

/// Ordered group of checklist items sharing a display heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistCategory {
    pub name: String,
    pub items: Vec<ChecklistItem>,
}

impl ChecklistCategory {
    pub fn critical_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.items.iter().filter(|item| item.critical)
    }
}

/// Severity attached to risk zones and incident reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Moderate => "MODERATE",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Severity {
    type Err = AssessmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Severity::Low),
            "MODERATE" => Ok(Severity::Moderate),
            "HIGH" => Ok(Severity::High),
            other => Err(AssessmentError::InvalidInput(format!(
                "unknown severity '{other}', expected LOW, MODERATE or HIGH"
            ))),
        }
    }
}

/// Circular area around a location with a history of safety incidents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskZone {
    pub id: ZoneId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
    pub severity: Severity,
    pub description: String,
    pub incident_count: u32,
}

/// Reported incident plotted on the incident map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: IncidentId,
    pub lat: f64,
    pub lng: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
    pub description: String,
    pub severity: Severity,
    pub verified: bool,
}

pub(crate) fn coordinates_in_range(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}
