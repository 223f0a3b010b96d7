use crate::infra::command_catalog;
use clap::Args;
use safetrip::assessment::{
    checklist_completion, compute_checklist_risk, compute_quiz_risk, export_checklist_text,
    AnswerSet, AssessmentError, CheckSet, ChecklistRisk, Completion, QuizAnswer, QuizRisk,
};
use safetrip::catalog::{ItemId, QuestionId, QuizQuestion};
use safetrip::error::AppError;
use safetrip::geofence::{find_nearby_zones, GeoPoint, NearbyZone};
use safetrip::incidents::{
    distinct_types, select_incidents, IncidentSelection, SeverityFilter, TypeFilter,
};
use safetrip::resources::{Hotline, SafetyGuide};
use safetrip::router::{ChecklistAssessResponse, LocationResponse, QuizAssessResponse};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct AnswerArgs {
    /// Ids answered "yes", comma-separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) yes: Vec<u32>,
    /// Ids answered "no", comma-separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) no: Vec<u32>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ChecklistExportArgs {
    /// Destination file. Prints to stdout when omitted.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct LocationArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) lat: f64,
    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) lng: f64,
    /// Reported accuracy radius in metres
    #[arg(long)]
    pub(crate) accuracy: Option<f64>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct IncidentListArgs {
    /// LOW, MODERATE, HIGH or ALL
    #[arg(long, default_value = "ALL")]
    pub(crate) severity: String,
    /// Exact incident type, or ALL
    #[arg(long = "type", default_value = "ALL")]
    pub(crate) kind: String,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ResourcesArgs {
    /// Add the hotlines registered for this region (e.g. "Texas")
    #[arg(long)]
    pub(crate) region: Option<String>,
}

pub(crate) fn run_quiz_questions() -> Result<(), AppError> {
    let catalog = command_catalog()?;
    emit(|out| render_questions(out, catalog.questions()))?;
    Ok(())
}

pub(crate) fn run_quiz_assess(args: AnswerArgs) -> Result<(), AppError> {
    let catalog = command_catalog()?;
    let answers: AnswerSet = answer_map(&args.yes, &args.no)?
        .into_iter()
        .map(|(id, yes)| {
            let answer = if yes { QuizAnswer::Yes } else { QuizAnswer::No };
            (QuestionId(id), answer)
        })
        .collect();

    let risk = compute_quiz_risk(&answers, catalog.questions())?;
    info!(score = risk.score, level = %risk.level, "quiz assessed");

    if args.json {
        return print_json(&QuizAssessResponse {
            guidance: risk.guidance(),
            risk,
        });
    }
    emit(|out| render_quiz_risk(out, &risk))
}

pub(crate) fn run_checklist_assess(args: AnswerArgs) -> Result<(), AppError> {
    let catalog = command_catalog()?;
    let checks: CheckSet = answer_map(&args.yes, &args.no)?
        .into_iter()
        .map(|(id, yes)| (ItemId(id), yes))
        .collect();

    let categories = catalog.checklist();
    let risk = compute_checklist_risk(&checks, categories)?;
    let completion = checklist_completion(&checks, categories);
    info!(critical_issues = risk.critical_issues, level = %risk.level, "checklist assessed");

    if args.json {
        return print_json(&ChecklistAssessResponse {
            completion,
            guidance: risk.guidance(),
            risk,
        });
    }
    emit(|out| render_checklist_risk(out, &risk, &completion))
}

pub(crate) fn run_checklist_export(args: ChecklistExportArgs) -> Result<(), AppError> {
    let catalog = command_catalog()?;
    let text = export_checklist_text(catalog.checklist());

    match args.output {
        Some(path) => {
            std::fs::write(&path, &text)?;
            info!(path = %path.display(), "checklist exported");
        }
        None => print!("{text}"),
    }
    Ok(())
}

pub(crate) fn run_location_check(args: LocationArgs) -> Result<(), AppError> {
    let catalog = command_catalog()?;
    let point = GeoPoint::new(args.lat, args.lng, args.accuracy)?;
    let zones = find_nearby_zones(&point, catalog.zones());

    if args.json {
        return print_json(&LocationResponse { point, zones });
    }
    emit(|out| render_zones(out, &point, &zones))
}

pub(crate) fn run_incident_list(args: IncidentListArgs) -> Result<(), AppError> {
    let catalog = command_catalog()?;
    let severity: SeverityFilter = args.severity.parse()?;
    let kind = TypeFilter::from(args.kind.as_str());
    let selection = select_incidents(catalog.incidents(), severity, &kind);

    if args.json {
        return print_json(&selection);
    }
    emit(|out| render_incidents(out, &selection))
}

pub(crate) fn run_incident_types() -> Result<(), AppError> {
    let catalog = command_catalog()?;
    for kind in distinct_types(catalog.incidents()) {
        println!("{kind}");
    }
    Ok(())
}

pub(crate) fn run_resources(args: ResourcesArgs) -> Result<(), AppError> {
    let catalog = command_catalog()?;
    let hotlines = catalog.directory().for_region(args.region.as_deref());
    emit(|out| render_resources(out, &hotlines, catalog.guides()))
}

/// Merges the yes/no id lists. An id may appear in only one of them.
fn answer_map(yes: &[u32], no: &[u32]) -> Result<BTreeMap<u32, bool>, AssessmentError> {
    let mut answers: BTreeMap<u32, bool> = yes.iter().map(|id| (*id, true)).collect();
    for id in no {
        if answers.get(id) == Some(&true) {
            return Err(AssessmentError::InvalidInput(format!(
                "id {id} is listed under both --yes and --no"
            )));
        }
        answers.insert(*id, false);
    }
    Ok(answers)
}

/// Renders into a buffer and prints it in one piece.
fn emit(render: impl FnOnce(&mut String) -> fmt::Result) -> Result<(), AppError> {
    let mut out = String::new();
    render(&mut out).map_err(std::io::Error::other)?;
    print!("{out}");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn render_questions(out: &mut String, questions: &[QuizQuestion]) -> fmt::Result {
    for question in questions {
        writeln!(
            out,
            "{:>3}. [weight {}] {}",
            question.id, question.weight, question.text
        )?;
    }
    Ok(())
}

fn render_guidance(
    out: &mut String,
    headline: &str,
    message: &str,
    follow_ups: &[&str],
) -> fmt::Result {
    writeln!(out, "\n{headline}")?;
    writeln!(out, "{message}")?;
    if !follow_ups.is_empty() {
        writeln!(out, "Next steps: {}", follow_ups.join(" | "))?;
    }
    Ok(())
}

fn render_quiz_risk(out: &mut String, risk: &QuizRisk) -> fmt::Result {
    let guidance = risk.guidance();
    writeln!(out, "Relationship red-flag quiz")?;
    writeln!(
        out,
        "  Score: {}/{} ({}%)",
        risk.score, risk.max_score, risk.percentage
    )?;
    writeln!(out, "  Risk level: {}", risk.level)?;
    render_guidance(out, guidance.headline, guidance.message, guidance.follow_ups)
}

fn render_checklist_risk(
    out: &mut String,
    risk: &ChecklistRisk,
    completion: &Completion,
) -> fmt::Result {
    let guidance = risk.guidance();
    writeln!(out, "Pre-travel safety checklist")?;
    writeln!(
        out,
        "  Answered: {}/{} ({}%)",
        completion.answered, completion.total, completion.percentage
    )?;
    writeln!(
        out,
        "  Critical issues: {}/{} ({}%)",
        risk.critical_issues, risk.critical_total, risk.critical_percentage
    )?;
    writeln!(
        out,
        "  All issues: {}/{} ({}%)",
        risk.total_issues, risk.total_items, risk.overall_percentage
    )?;
    writeln!(out, "  Risk level: {}", risk.level)?;
    render_guidance(
        out,
        &guidance.headline,
        &guidance.message,
        &guidance.follow_ups,
    )
}

fn render_zones(out: &mut String, point: &GeoPoint, zones: &[NearbyZone]) -> fmt::Result {
    if zones.is_empty() {
        writeln!(
            out,
            "No known risk zones around ({:.4}, {:.4}).",
            point.lat(),
            point.lng()
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "{} risk zone(s) around ({:.4}, {:.4}):",
        zones.len(),
        point.lat(),
        point.lng()
    )?;
    for (index, nearby) in zones.iter().enumerate() {
        let zone = &nearby.zone;
        writeln!(
            out,
            "{}. {} [{}] {:.1} km from centre (radius {} km), {} reported incidents",
            index + 1,
            zone.name,
            zone.severity,
            nearby.distance_km,
            zone.radius_km,
            zone.incident_count
        )?;
        writeln!(out, "   {}", zone.description)?;
    }
    Ok(())
}

fn render_incidents(out: &mut String, selection: &IncidentSelection) -> fmt::Result {
    writeln!(
        out,
        "Showing {} of {} incidents (severity: {}, type: {})",
        selection.shown, selection.total, selection.severity, selection.kind
    )?;
    for incident in &selection.incidents {
        let verified = if incident.verified { " [verified]" } else { "" };
        writeln!(
            out,
            "{}  {:<8}  {}  {}{}",
            incident.date, incident.severity, incident.kind, incident.location, verified
        )?;
        writeln!(out, "    {}", incident.description)?;
    }
    Ok(())
}

fn render_resources(
    out: &mut String,
    hotlines: &[&Hotline],
    guides: &[SafetyGuide],
) -> fmt::Result {
    writeln!(out, "Emergency hotlines")?;
    for hotline in hotlines {
        writeln!(
            out,
            "  {}: {} ({})",
            hotline.name, hotline.number, hotline.description
        )?;
    }
    for guide in guides {
        writeln!(out, "\n{}", guide.title)?;
        for step in &guide.steps {
            writeln!(out, "  - {step}")?;
        }
    }
    Ok(())
}
