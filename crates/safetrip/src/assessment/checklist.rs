use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{rounded_percentage, AssessmentError, RiskLevel};
use crate::catalog::{ChecklistCategory, ItemId};

/// Yes (`true`) / no (`false`) answers keyed by checklist item id. Missing ids are unanswered.
pub type CheckSet = BTreeMap<ItemId, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRisk {
    pub critical_issues: u32,
    pub total_issues: u32,
    pub critical_total: u32,
    pub total_items: u32,
    pub critical_percentage: u32,
    pub overall_percentage: u32,
    pub level: RiskLevel,
}

impl ChecklistRisk {
    /// Classification rules, first match wins. The count and percentage checks of each
    /// tier are independent of each other.
    pub fn level_for(
        critical_issues: u32,
        critical_percentage: u32,
        overall_percentage: u32,
    ) -> RiskLevel {
        if critical_issues >= 3 || critical_percentage >= 50 {
            RiskLevel::Critical
        } else if critical_issues >= 1 || overall_percentage >= 30 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn guidance(&self) -> ChecklistGuidance {
        ChecklistGuidance::for_risk(self)
    }
}

/// Scores every item of every category once. Only an explicit `false` counts as an issue.
pub fn compute_checklist_risk(
    checks: &CheckSet,
    categories: &[ChecklistCategory],
) -> Result<ChecklistRisk, AssessmentError> {
    let mut critical_issues = 0u32;
    let mut total_issues = 0u32;
    let mut critical_total = 0u32;
    let mut total_items = 0u32;

    for item in categories.iter().flat_map(|category| category.items.iter()) {
        total_items += 1;
        if item.critical {
            critical_total += 1;
        }

        if checks.get(&item.id) == Some(&false) {
            total_issues += 1;
            if item.critical {
                critical_issues += 1;
            }
        }
    }

    let critical_percentage =
        rounded_percentage(u64::from(critical_issues), u64::from(critical_total)).ok_or_else(
            || AssessmentError::Configuration("checklist has no critical items".to_string()),
        )?;
    let overall_percentage = rounded_percentage(u64::from(total_issues), u64::from(total_items))
        .ok_or_else(|| AssessmentError::Configuration("checklist has no items".to_string()))?;

    let level = ChecklistRisk::level_for(critical_issues, critical_percentage, overall_percentage);

    debug!(
        critical_issues,
        total_issues,
        critical_percentage,
        overall_percentage,
        level = level.label(),
        "checklist risk computed"
    );

    Ok(ChecklistRisk {
        critical_issues,
        total_issues,
        critical_total,
        total_items,
        critical_percentage,
        overall_percentage,
        level,
    })
}

/// How much of the checklist has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub answered: u32,
    pub total: u32,
    pub percentage: u32,
    pub complete: bool,
}

/// Counts answers for items present in `categories`; stray ids do not inflate progress.
pub fn checklist_completion(checks: &CheckSet, categories: &[ChecklistCategory]) -> Completion {
    let mut answered = 0u32;
    let mut total = 0u32;

    for item in categories.iter().flat_map(|category| category.items.iter()) {
        total += 1;
        if checks.contains_key(&item.id) {
            answered += 1;
        }
    }

    Completion {
        answered,
        total,
        percentage: rounded_percentage(u64::from(answered), u64::from(total)).unwrap_or(0),
        complete: total > 0 && answered == total,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistGuidance {
    pub headline: String,
    pub message: String,
    pub follow_ups: Vec<&'static str>,
}

impl ChecklistGuidance {
    pub fn for_risk(risk: &ChecklistRisk) -> Self {
        let headline = format!("{} RISK LEVEL", risk.level.label());
        match risk.level {
            // `level_for` has no HIGH tier; a HIGH level only comes from a hand-built
            // result and gets the critical advice.
            RiskLevel::Critical | RiskLevel::High => {
                let noun = if risk.critical_issues == 1 {
                    "question"
                } else {
                    "questions"
                };
                Self {
                    headline,
                    message: format!(
                        "You answered \"No\" to {} critical safety {noun}. These indicate serious potential risks that should not be ignored.",
                        risk.critical_issues
                    ),
                    follow_ups: vec!["Call Domestic Violence Hotline", "View Emergency Resources"],
                }
            }
            RiskLevel::Moderate => Self {
                headline,
                message: "Some safety concerns detected. Consider addressing these issues before traveling and implementing additional safety measures.".to_string(),
                follow_ups: Vec::new(),
            },
            RiskLevel::Low => Self {
                headline,
                message: "Your responses suggest good safety practices. Continue to trust your instincts and stay alert while traveling.".to_string(),
                follow_ups: Vec::new(),
            },
        }
    }
}

/// Plain-text checklist for download: one block per category, items as empty boxes.
pub fn export_checklist_text(categories: &[ChecklistCategory]) -> String {
    categories
        .iter()
        .map(|category| {
            let items: Vec<String> = category
                .items
                .iter()
                .map(|item| format!("□ {}", item.text))
                .collect();
            format!("{}:\n{}\n", category.name, items.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ChecklistItem;

    fn item(id: u32, critical: bool) -> ChecklistItem {
        ChecklistItem {
            id: ItemId(id),
            text: format!("item {id}"),
            critical,
            explanation: String::new(),
        }
    }

    fn categories() -> Vec<ChecklistCategory> {
        vec![
            ChecklistCategory {
                name: "Planning".to_string(),
                items: vec![item(1, true), item(2, false), item(3, false)],
            },
            ChecklistCategory {
                name: "Money".to_string(),
                items: vec![item(4, true), item(5, true), item(6, false)],
            },
        ]
    }

    #[test]
    fn two_of_three_critical_issues_is_critical_by_percentage() {
        let mut checks = CheckSet::new();
        checks.insert(ItemId(1), false);
        checks.insert(ItemId(4), false);
        checks.insert(ItemId(5), true);

        let risk = compute_checklist_risk(&checks, &categories()).expect("checklist scores");
        assert_eq!(risk.critical_issues, 2);
        assert_eq!(risk.critical_total, 3);
        assert_eq!(risk.critical_percentage, 67);
        assert_eq!(risk.total_issues, 2);
        assert_eq!(risk.total_items, 6);
        assert_eq!(risk.overall_percentage, 33);
        assert_eq!(risk.level, RiskLevel::Critical);
    }

    #[test]
    fn only_explicit_no_counts_as_issue() {
        let mut checks = CheckSet::new();
        for id in 1..=6 {
            checks.insert(ItemId(id), true);
        }
        let risk = compute_checklist_risk(&checks, &categories()).expect("checklist scores");
        assert_eq!(risk.total_issues, 0);
        assert_eq!(risk.level, RiskLevel::Low);

        let empty = compute_checklist_risk(&CheckSet::new(), &categories()).expect("scores");
        assert_eq!(empty.total_issues, 0);
        assert_eq!(empty.critical_percentage, 0);
        assert_eq!(empty.level, RiskLevel::Low);
    }

    #[test]
    fn non_critical_issues_reach_moderate_by_overall_percentage() {
        let mut checks = CheckSet::new();
        checks.insert(ItemId(2), false);
        checks.insert(ItemId(3), false);

        let risk = compute_checklist_risk(&checks, &categories()).expect("checklist scores");
        assert_eq!(risk.critical_issues, 0);
        assert_eq!(risk.overall_percentage, 33);
        assert_eq!(risk.level, RiskLevel::Moderate);
    }

    #[test]
    fn single_non_critical_issue_stays_low() {
        let mut checks = CheckSet::new();
        checks.insert(ItemId(6), false);

        let risk = compute_checklist_risk(&checks, &categories()).expect("checklist scores");
        assert_eq!(risk.overall_percentage, 17);
        assert_eq!(risk.level, RiskLevel::Low);
    }

    #[test]
    fn three_critical_issues_are_critical_by_count() {
        let categories = vec![ChecklistCategory {
            name: "Many".to_string(),
            items: (1..=10).map(|id| item(id, true)).collect(),
        }];
        let checks: CheckSet = (1..=3).map(|id| (ItemId(id), false)).collect();

        let risk = compute_checklist_risk(&checks, &categories).expect("checklist scores");
        assert_eq!(risk.critical_percentage, 30);
        assert_eq!(risk.level, RiskLevel::Critical);
    }

    #[test]
    fn flipping_a_critical_answer_to_no_never_lowers_the_level() {
        let categories = categories();
        let base_answers = [None, Some(true)];

        for base in base_answers {
            for critical_id in [1u32, 4, 5] {
                let mut checks = CheckSet::new();
                checks.insert(ItemId(2), false);
                if let Some(value) = base {
                    checks.insert(ItemId(critical_id), value);
                }
                let before = compute_checklist_risk(&checks, &categories).expect("scores");

                checks.insert(ItemId(critical_id), false);
                let after = compute_checklist_risk(&checks, &categories).expect("scores");
                assert!(after.level >= before.level);
            }
        }
    }

    #[test]
    fn catalog_without_critical_items_is_a_configuration_error() {
        let categories = vec![ChecklistCategory {
            name: "Plain".to_string(),
            items: vec![item(1, false)],
        }];
        let err = compute_checklist_risk(&CheckSet::new(), &categories)
            .expect_err("no critical items");
        assert!(matches!(err, AssessmentError::Configuration(_)));
    }

    #[test]
    fn completion_ignores_unknown_ids() {
        let mut checks = CheckSet::new();
        checks.insert(ItemId(1), true);
        checks.insert(ItemId(2), false);
        checks.insert(ItemId(42), false);

        let completion = checklist_completion(&checks, &categories());
        assert_eq!(completion.answered, 2);
        assert_eq!(completion.total, 6);
        assert_eq!(completion.percentage, 33);
        assert!(!completion.complete);

        let full: CheckSet = (1..=6).map(|id| (ItemId(id), true)).collect();
        assert!(checklist_completion(&full, &categories()).complete);
    }

    #[test]
    fn guidance_pluralizes_critical_count() {
        let mut checks = CheckSet::new();
        checks.insert(ItemId(4), false);
        let categories = vec![ChecklistCategory {
            name: "Pair".to_string(),
            items: vec![item(4, true), item(5, true)],
        }];
        let risk = compute_checklist_risk(&checks, &categories).expect("checklist scores");
        assert_eq!(risk.level, RiskLevel::Critical);

        let guidance = risk.guidance();
        assert_eq!(guidance.headline, "CRITICAL RISK LEVEL");
        assert!(guidance.message.contains("1 critical safety question."));
    }

    #[test]
    fn classification_never_yields_high() {
        for critical_issues in 0..=5 {
            for critical_percentage in (0..=100).step_by(5) {
                for overall_percentage in (0..=100).step_by(5) {
                    let level = ChecklistRisk::level_for(
                        critical_issues,
                        critical_percentage,
                        overall_percentage,
                    );
                    assert_ne!(level, RiskLevel::High);
                }
            }
        }
    }

    #[test]
    fn hand_built_high_result_gets_critical_advice() {
        let risk = ChecklistRisk {
            critical_issues: 2,
            total_issues: 2,
            critical_total: 9,
            total_items: 18,
            critical_percentage: 22,
            overall_percentage: 11,
            level: RiskLevel::High,
        };
        let guidance = risk.guidance();
        assert_eq!(guidance.headline, "HIGH RISK LEVEL");
        assert!(guidance.message.contains("2 critical safety questions."));
        assert!(!guidance.follow_ups.is_empty());
    }

    #[test]
    fn export_renders_categories_as_checkbox_blocks() {
        let text = export_checklist_text(&categories());
        assert_eq!(
            text,
            "Planning:\n□ item 1\n□ item 2\n□ item 3\n\nMoney:\n□ item 4\n□ item 5\n□ item 6\n"
        );
    }
}
