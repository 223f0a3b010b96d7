use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::assessment::{
    checklist_completion, compute_checklist_risk, compute_quiz_risk, AnswerSet,
    AssessmentError, CheckSet, ChecklistGuidance, ChecklistRisk, Completion, QuizGuidance,
    QuizRisk,
};
use crate::catalog::{Catalog, ChecklistCategory, QuizQuestion};
use crate::chat::{CannedReply, CannedResponder};
use crate::error::AppError;
use crate::geofence::{find_nearby_zones, GeoPoint, NearbyZone};
use crate::incidents::{
    distinct_types, select_incidents, IncidentSelection, SeverityFilter, TypeFilter,
};
use crate::resources::{Hotline, SafetyGuide};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct EngineState {
    pub catalog: Arc<Catalog>,
    pub responder: Arc<CannedResponder>,
}

impl EngineState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            responder: Arc::new(CannedResponder::standard()),
        }
    }
}

/// Router builder exposing the scoring, geofence, incident and resource endpoints.
pub fn engine_router(state: EngineState) -> Router {
    Router::new()
        .route("/api/v1/quiz/questions", get(quiz_questions_handler))
        .route("/api/v1/quiz/assess", post(quiz_assess_handler))
        .route("/api/v1/checklist", get(checklist_handler))
        .route("/api/v1/checklist/assess", post(checklist_assess_handler))
        .route("/api/v1/location/zones", post(nearby_zones_handler))
        .route("/api/v1/incidents", get(incidents_handler))
        .route("/api/v1/incidents/types", get(incident_types_handler))
        .route("/api/v1/chat/reply", post(chat_reply_handler))
        .route("/api/v1/resources", get(resources_handler))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizAssessRequest {
    #[serde(default)]
    pub answers: AnswerSet,
}

#[derive(Debug, Serialize)]
pub struct QuizAssessResponse {
    #[serde(flatten)]
    pub risk: QuizRisk,
    pub guidance: QuizGuidance,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChecklistAssessRequest {
    #[serde(default)]
    pub checks: CheckSet,
}

#[derive(Debug, Serialize)]
pub struct ChecklistAssessResponse {
    #[serde(flatten)]
    pub risk: ChecklistRisk,
    pub completion: Completion,
    pub guidance: ChecklistGuidance,
}

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub accuracy_meters: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub point: GeoPoint,
    pub zones: Vec<NearbyZone>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IncidentQuery {
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IncidentTypesResponse {
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourcesQuery {
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub hotlines: Vec<Hotline>,
    pub regions: Vec<String>,
    pub guides: Vec<SafetyGuide>,
}

pub(crate) async fn quiz_questions_handler(
    State(state): State<EngineState>,
) -> Json<Vec<QuizQuestion>> {
    Json(state.catalog.questions().to_vec())
}

pub(crate) async fn quiz_assess_handler(
    State(state): State<EngineState>,
    Json(request): Json<QuizAssessRequest>,
) -> Result<Json<QuizAssessResponse>, AppError> {
    let risk = compute_quiz_risk(&request.answers, state.catalog.questions())?;
    Ok(Json(QuizAssessResponse {
        guidance: risk.guidance(),
        risk,
    }))
}

pub(crate) async fn checklist_handler(
    State(state): State<EngineState>,
) -> Json<Vec<ChecklistCategory>> {
    Json(state.catalog.checklist().to_vec())
}

pub(crate) async fn checklist_assess_handler(
    State(state): State<EngineState>,
    Json(request): Json<ChecklistAssessRequest>,
) -> Result<Json<ChecklistAssessResponse>, AppError> {
    let categories = state.catalog.checklist();
    let risk = compute_checklist_risk(&request.checks, categories)?;
    Ok(Json(ChecklistAssessResponse {
        completion: checklist_completion(&request.checks, categories),
        guidance: risk.guidance(),
        risk,
    }))
}

pub(crate) async fn nearby_zones_handler(
    State(state): State<EngineState>,
    Json(request): Json<LocationRequest>,
) -> Result<Json<LocationResponse>, AppError> {
    let point = GeoPoint::new(request.lat, request.lng, request.accuracy_meters)?;
    let zones = find_nearby_zones(&point, state.catalog.zones());
    Ok(Json(LocationResponse { point, zones }))
}

pub(crate) async fn incidents_handler(
    State(state): State<EngineState>,
    Query(query): Query<IncidentQuery>,
) -> Result<Json<IncidentSelection>, AppError> {
    let severity: SeverityFilter = query.severity.as_deref().unwrap_or_default().parse()?;
    let kind = query
        .kind
        .as_deref()
        .map(TypeFilter::from)
        .unwrap_or_default();

    Ok(Json(select_incidents(
        state.catalog.incidents(),
        severity,
        &kind,
    )))
}

pub(crate) async fn incident_types_handler(
    State(state): State<EngineState>,
) -> Json<IncidentTypesResponse> {
    let types = distinct_types(state.catalog.incidents())
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(IncidentTypesResponse { types })
}

pub(crate) async fn chat_reply_handler(
    State(state): State<EngineState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<CannedReply>, AppError> {
    state
        .responder
        .reply(&request.message)
        .map(Json)
        .ok_or_else(|| AssessmentError::InvalidInput("message must not be blank".to_string()).into())
}

pub(crate) async fn resources_handler(
    State(state): State<EngineState>,
    Query(query): Query<ResourcesQuery>,
) -> Json<ResourcesResponse> {
    let directory = state.catalog.directory();
    Json(ResourcesResponse {
        hotlines: directory
            .for_region(query.region.as_deref())
            .into_iter()
            .cloned()
            .collect(),
        regions: directory.regions().map(str::to_string).collect(),
        guides: state.catalog.guides().to_vec(),
    })
}
