//! Immutable domain tables loaded once at startup.
//!
//! A [`Catalog`] only exists in validated form: ids are unique per table, weights and
//! radii are positive, coordinates are in range, and the quiz and checklist can be
//! scored. Any violation fails the load with a [`CatalogError`].

mod builtin;
pub mod domain;
mod incidents_csv;

pub use domain::{
    ChecklistCategory, ChecklistItem, IncidentId, IncidentRecord, ItemId, QuestionId,
    QuizQuestion, RiskZone, Severity, ZoneId,
};
pub use incidents_csv::parse_incidents;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::CatalogConfig;
use crate::resources::{EmergencyDirectory, SafetyGuide};
use domain::coordinates_in_range;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{table} catalog is empty")]
    Empty { table: &'static str },
    #[error("duplicate id {id} in {table} catalog")]
    DuplicateId { table: &'static str, id: u32 },
    #[error("quiz question {id} must carry a positive weight")]
    NonPositiveWeight { id: u32 },
    #[error("quiz question weights must total at most 4294967295")]
    WeightOverflow,
    #[error("risk zone {id} must carry a positive, finite radius (got {radius_km})")]
    InvalidRadius { id: u32, radius_km: f64 },
    #[error("checklist must contain at least one critical item")]
    NoCriticalItems,
    #[error("{table} record {id} has out-of-range coordinates ({lat}, {lng})")]
    InvalidCoordinates {
        table: &'static str,
        id: u32,
        lat: f64,
        lng: f64,
    },
    #[error("failed to read catalog data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid incident CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Serialized form of the whole catalog, as distributed in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub questions: Vec<QuizQuestion>,
    pub checklist: Vec<ChecklistCategory>,
    #[serde(default)]
    pub zones: Vec<RiskZone>,
    #[serde(default)]
    pub incidents: Vec<IncidentRecord>,
    #[serde(default)]
    pub directory: EmergencyDirectory,
    #[serde(default)]
    pub guides: Vec<SafetyGuide>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    questions: Vec<QuizQuestion>,
    checklist: Vec<ChecklistCategory>,
    zones: Vec<RiskZone>,
    incidents: Vec<IncidentRecord>,
    directory: EmergencyDirectory,
    guides: Vec<SafetyGuide>,
}

impl Catalog {
    /// The tables shipped with the application.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_document(builtin::document())
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        validate_questions(&document.questions)?;
        validate_checklist(&document.checklist)?;
        validate_zones(&document.zones)?;
        validate_incidents(&document.incidents)?;

        Ok(Self {
            questions: document.questions,
            checklist: document.checklist,
            zones: document.zones,
            incidents: document.incidents,
            directory: document.directory,
            guides: document.guides,
        })
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Loads the configured catalog, falling back to the built-in tables, then swaps in
    /// the incident table from CSV when one is configured.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                info!(path = %path.display(), "loading catalog from JSON");
                Self::from_json_path(path)?
            }
            None => Self::builtin()?,
        };

        let catalog = match &config.incidents_csv {
            Some(path) => {
                info!(path = %path.display(), "importing incidents from CSV");
                let incidents = parse_incidents(File::open(path)?)?;
                catalog.with_incidents(incidents)?
            }
            None => catalog,
        };

        info!(
            questions = catalog.questions.len(),
            checklist_items = catalog.checklist_items().count(),
            zones = catalog.zones.len(),
            incidents = catalog.incidents.len(),
            "catalog ready"
        );

        Ok(catalog)
    }

    pub fn with_incidents(mut self, incidents: Vec<IncidentRecord>) -> Result<Self, CatalogError> {
        validate_incidents(&incidents)?;
        self.incidents = incidents;
        Ok(self)
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn checklist(&self) -> &[ChecklistCategory] {
        &self.checklist
    }

    pub fn checklist_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.checklist.iter().flat_map(|category| category.items.iter())
    }

    pub fn zones(&self) -> &[RiskZone] {
        &self.zones
    }

    pub fn incidents(&self) -> &[IncidentRecord] {
        &self.incidents
    }

    pub fn directory(&self) -> &EmergencyDirectory {
        &self.directory
    }

    pub fn guides(&self) -> &[SafetyGuide] {
        &self.guides
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            questions: self.questions.clone(),
            checklist: self.checklist.clone(),
            zones: self.zones.clone(),
            incidents: self.incidents.clone(),
            directory: self.directory.clone(),
            guides: self.guides.clone(),
        }
    }
}

fn ensure_unique(
    table: &'static str,
    ids: impl IntoIterator<Item = u32>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { table, id });
        }
    }
    Ok(())
}

fn validate_questions(questions: &[QuizQuestion]) -> Result<(), CatalogError> {
    if questions.is_empty() {
        return Err(CatalogError::Empty { table: "quiz" });
    }
    ensure_unique("quiz", questions.iter().map(|question| question.id.0))?;
    if let Some(question) = questions.iter().find(|question| question.weight == 0) {
        return Err(CatalogError::NonPositiveWeight { id: question.id.0 });
    }
    questions
        .iter()
        .try_fold(0u32, |total, question| total.checked_add(question.weight))
        .ok_or(CatalogError::WeightOverflow)?;
    Ok(())
}

fn validate_checklist(categories: &[ChecklistCategory]) -> Result<(), CatalogError> {
    let items: Vec<&ChecklistItem> = categories
        .iter()
        .flat_map(|category| category.items.iter())
        .collect();
    if items.is_empty() {
        return Err(CatalogError::Empty { table: "checklist" });
    }
    ensure_unique("checklist", items.iter().map(|item| item.id.0))?;
    if !items.iter().any(|item| item.critical) {
        return Err(CatalogError::NoCriticalItems);
    }
    Ok(())
}

fn validate_zones(zones: &[RiskZone]) -> Result<(), CatalogError> {
    ensure_unique("zone", zones.iter().map(|zone| zone.id.0))?;
    for zone in zones {
        if !(zone.radius_km.is_finite() && zone.radius_km > 0.0) {
            return Err(CatalogError::InvalidRadius {
                id: zone.id.0,
                radius_km: zone.radius_km,
            });
        }
        if !coordinates_in_range(zone.lat, zone.lng) {
            return Err(CatalogError::InvalidCoordinates {
                table: "zone",
                id: zone.id.0,
                lat: zone.lat,
                lng: zone.lng,
            });
        }
    }
    Ok(())
}

fn validate_incidents(incidents: &[IncidentRecord]) -> Result<(), CatalogError> {
    ensure_unique("incident", incidents.iter().map(|incident| incident.id.0))?;
    if let Some(incident) = incidents
        .iter()
        .find(|incident| !coordinates_in_range(incident.lat, incident.lng))
    {
        return Err(CatalogError::InvalidCoordinates {
            table: "incident",
            id: incident.id.0,
            lat: incident.lat,
            lng: incident.lng,
        });
    }
    Ok(())
}
