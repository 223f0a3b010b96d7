use safetrip::assessment::{
    compute_checklist_risk, compute_quiz_risk, export_checklist_text, AnswerSet, CheckSet,
    QuizAnswer, QuizSession, RiskLevel,
};
use safetrip::catalog::{
    Catalog, ChecklistCategory, ChecklistItem, ItemId, QuestionId, QuizQuestion,
};
use safetrip::geofence::{find_nearby_zones, haversine_km, GeoPoint};
use safetrip::incidents::{distinct_types, filter_incidents, SeverityFilter, TypeFilter};

fn catalog() -> Catalog {
    Catalog::builtin().expect("built-in catalog validates")
}

fn forty_four_point_quiz() -> Vec<QuizQuestion> {
    [5, 5, 4, 3, 3, 4, 4, 4, 4, 4, 4]
        .iter()
        .enumerate()
        .map(|(index, weight)| QuizQuestion {
            id: QuestionId(index as u32 + 1),
            text: format!("question {}", index + 1),
            weight: *weight,
        })
        .collect()
}

#[test]
fn quiz_fourteen_of_forty_four_points_is_moderate() {
    let questions = forty_four_point_quiz();
    assert_eq!(questions.iter().map(|q| q.weight).sum::<u32>(), 44);

    let mut answers = AnswerSet::new();
    answers.insert(QuestionId(1), QuizAnswer::Yes);
    answers.insert(QuestionId(2), QuizAnswer::Yes);
    answers.insert(QuestionId(3), QuizAnswer::Yes);
    answers.insert(QuestionId(4), QuizAnswer::No);

    let risk = compute_quiz_risk(&answers, &questions).expect("quiz scores");
    assert_eq!(risk.score, 14);
    assert_eq!(risk.max_score, 44);
    assert_eq!(risk.percentage, 32);
    assert_eq!(risk.level, RiskLevel::Moderate);
}

#[test]
fn builtin_quiz_extremes() {
    let catalog = catalog();
    let questions = catalog.questions();

    let all_yes: AnswerSet = questions
        .iter()
        .map(|question| (question.id, QuizAnswer::Yes))
        .collect();
    let risk = compute_quiz_risk(&all_yes, questions).expect("quiz scores");
    assert_eq!(risk.percentage, 100);
    assert_eq!(risk.level, RiskLevel::Critical);

    let risk = compute_quiz_risk(&AnswerSet::new(), questions).expect("quiz scores");
    assert_eq!(risk.percentage, 0);
    assert_eq!(risk.level, RiskLevel::Low);
}

#[test]
fn quiz_scoring_is_deterministic_and_leaves_inputs_untouched() {
    let catalog = catalog();
    let mut answers = AnswerSet::new();
    answers.insert(QuestionId(4), QuizAnswer::Yes);
    answers.insert(QuestionId(6), QuizAnswer::Yes);
    let snapshot = answers.clone();

    let first = compute_quiz_risk(&answers, catalog.questions()).expect("quiz scores");
    let second = compute_quiz_risk(&answers, catalog.questions()).expect("quiz scores");
    assert_eq!(first, second);
    assert_eq!(answers, snapshot);
    assert_eq!(first.score, 10);
    assert_eq!(first.max_score, 49);
    assert_eq!(first.percentage, 20);
}

#[test]
fn wizard_session_scores_the_builtin_quiz() {
    let catalog = catalog();
    let questions = catalog.questions();
    let mut session = QuizSession::new();

    while !session.is_finished() {
        let current = session
            .current_question(questions)
            .expect("question available")
            .id;
        let answer = if current.0 % 2 == 0 {
            QuizAnswer::Yes
        } else {
            QuizAnswer::No
        };
        session.answer(current, answer);
        session.advance(questions);
    }

    assert!(session.all_answered(questions));
    let risk = session.result(questions).expect("session scores");
    // even ids: 4 + 5 + 5 + 4 + 5 + 4
    assert_eq!(risk.score, 27);
    assert_eq!(risk.percentage, 55);
    assert_eq!(risk.level, RiskLevel::High);
}

fn three_critical_checklist() -> Vec<ChecklistCategory> {
    let item = |id: u32, critical: bool| ChecklistItem {
        id: ItemId(id),
        text: format!("item {id}"),
        critical,
        explanation: String::new(),
    };
    vec![ChecklistCategory {
        name: "Basics".to_string(),
        items: vec![
            item(1, true),
            item(2, true),
            item(3, true),
            item(4, false),
            item(5, false),
            item(6, false),
            item(7, false),
        ],
    }]
}

#[test]
fn checklist_two_of_three_critical_is_critical() {
    let mut checks = CheckSet::new();
    checks.insert(ItemId(1), false);
    checks.insert(ItemId(2), false);
    checks.insert(ItemId(3), true);

    let risk = compute_checklist_risk(&checks, &three_critical_checklist()).expect("scores");
    assert_eq!(risk.critical_issues, 2);
    assert_eq!(risk.critical_percentage, 67);
    assert_eq!(risk.level, RiskLevel::Critical);
}

#[test]
fn builtin_checklist_single_critical_no_is_moderate() {
    let catalog = catalog();
    let mut checks: CheckSet = catalog.checklist_items().map(|item| (item.id, true)).collect();
    checks.insert(ItemId(18), false);

    let risk = compute_checklist_risk(&checks, catalog.checklist()).expect("scores");
    assert_eq!(risk.critical_total, 9);
    assert_eq!(risk.total_items, 18);
    assert_eq!(risk.critical_issues, 1);
    assert_eq!(risk.critical_percentage, 11);
    assert_eq!(risk.overall_percentage, 6);
    assert_eq!(risk.level, RiskLevel::Moderate);
}

#[test]
fn exported_checklist_lists_every_item() {
    let catalog = catalog();
    let text = export_checklist_text(catalog.checklist());
    assert!(text.starts_with("Pre-Travel Communication:\n□ "));
    assert_eq!(text.matches('□').count(), 18);
    assert!(text.contains("\n\nFinancial Independence:\n"));
}

#[test]
fn death_valley_coordinates_match_death_valley_first() {
    let catalog = catalog();
    let point = GeoPoint::new(36.5054, -117.0794, Some(12.0)).expect("valid point");

    let nearby = find_nearby_zones(&point, catalog.zones());
    let first = nearby.first().expect("at least one zone matches");
    assert_eq!(first.zone.name, "Death Valley, California");
    assert!(first.distance_km.abs() < 1e-9);
    assert!(nearby
        .iter()
        .all(|found| found.distance_km <= found.zone.radius_km));
}

#[test]
fn point_between_zones_matches_nothing() {
    let catalog = catalog();
    let chicago = GeoPoint::new(41.8781, -87.6298, None).expect("valid point");
    assert!(find_nearby_zones(&chicago, catalog.zones()).is_empty());
}

#[test]
fn haversine_between_catalog_zones_is_symmetric() {
    let catalog = catalog();
    for a in catalog.zones() {
        for b in catalog.zones() {
            let forward = haversine_km(&a.center(), &b.center());
            let backward = haversine_km(&b.center(), &a.center());
            assert!((forward - backward).abs() < 1e-9);
            assert_eq!(forward == 0.0, a.id == b.id);
        }
    }
}

#[test]
fn incident_filter_identity_and_types() {
    let catalog = catalog();
    let all = filter_incidents(catalog.incidents(), SeverityFilter::All, &TypeFilter::All);
    assert_eq!(
        all.into_iter().cloned().collect::<Vec<_>>(),
        catalog.incidents().to_vec()
    );

    let rescue = TypeFilter::from("Emergency Rescue");
    let rescues = filter_incidents(catalog.incidents(), SeverityFilter::All, &rescue);
    assert_eq!(rescues.len(), 2);
    assert!(distinct_types(catalog.incidents()).contains(&"Emergency Rescue"));
}
