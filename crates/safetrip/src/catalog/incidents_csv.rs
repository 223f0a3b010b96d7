use std::io::Read;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::domain::{IncidentId, IncidentRecord, Severity};
use super::CatalogError;

/// Reads incident reports from a CSV export with the header
/// `id,lat,lng,location,type,date,description,severity,verified`.
///
/// Severity is case-insensitive; `verified` accepts true/false, yes/no and 1/0.
pub fn parse_incidents<R: Read>(reader: R) -> Result<Vec<IncidentRecord>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut incidents = Vec::new();

    for row in csv_reader.deserialize::<IncidentRow>() {
        incidents.push(row?.into_record());
    }

    Ok(incidents)
}

#[derive(Debug, Deserialize)]
struct IncidentRow {
    id: u32,
    lat: f64,
    lng: f64,
    location: String,
    #[serde(rename = "type")]
    kind: String,
    date: NaiveDate,
    #[serde(default)]
    description: String,
    #[serde(deserialize_with = "severity_from_label")]
    severity: Severity,
    #[serde(default, deserialize_with = "flag_from_text")]
    verified: bool,
}

impl IncidentRow {
    fn into_record(self) -> IncidentRecord {
        IncidentRecord {
            id: IncidentId(self.id),
            lat: self.lat,
            lng: self.lng,
            location: self.location,
            kind: self.kind,
            date: self.date,
            description: self.description,
            severity: self.severity,
            verified: self.verified,
        }
    }
}

fn severity_from_label<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Severity::from_str(&raw).map_err(serde::de::Error::custom)
}

fn flag_from_text<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no flag, got '{other}'"
        ))),
    }
}
