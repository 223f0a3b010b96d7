//! Emergency hotlines and step-by-step safety guidance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Phone or text line a traveller can reach for help.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotline {
    pub name: String,
    pub number: String,
    pub description: String,
}

/// National hotlines plus the extra lines offered by individual regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyDirectory {
    pub national: Vec<Hotline>,
    #[serde(default)]
    pub regional: BTreeMap<String, Vec<Hotline>>,
}

impl EmergencyDirectory {
    /// National hotlines followed by the lines registered for `region`.
    ///
    /// Regions match case-insensitively; an unknown or missing region yields only the
    /// national list.
    pub fn for_region(&self, region: Option<&str>) -> Vec<&Hotline> {
        let mut lines: Vec<&Hotline> = self.national.iter().collect();

        if let Some(region) = region.map(str::trim).filter(|value| !value.is_empty()) {
            if let Some((_, regional)) = self
                .regional
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(region))
            {
                lines.extend(regional.iter());
            }
        }

        lines
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regional.keys().map(String::as_str)
    }
}

/// Titled list of actions for one kind of emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyGuide {
    pub title: String,
    pub steps: Vec<String>,
}
