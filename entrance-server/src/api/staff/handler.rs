//! Staff API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::core::ServerState;
use crate::db::repository::{StaffFilter, StaffStore, pass};
use crate::passes;
use crate::roster::{self, ResizeOutcome};
use shared::error::{ApiResponse, AppError, AppResult};
use shared::models::{BoothSummary, Location, Pass, Staff, StaffCreate, StaffType, StaffUpdate};

#[derive(Debug, Deserialize)]
pub struct StaffCreateRequest {
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub booth_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub staff_type: Option<String>,
    #[serde(default)]
    pub sold: bool,
}

/// Booth edit: shared fields plus the desired headcount.
///
/// Omitted fields keep the anchor's value; `booth_id: ""` clears the booth.
#[derive(Debug, Deserialize)]
pub struct StaffEditRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub booth_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub staff_type: Option<String>,
    /// Number or numeric string
    #[serde(default)]
    pub count: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub day_entered: Option<NaiveDate>,
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn count_text(count: Option<&Value>) -> String {
    match count {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

async fn load(state: &ServerState, id: i64) -> AppResult<Staff> {
    state
        .staff
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::staff_not_found(id))
}

/// Dashboard list
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<StaffFilter>,
) -> AppResult<Json<Vec<Staff>>> {
    let staff = state.staff.list(&filter).await?;
    Ok(Json(staff))
}

/// Get staff by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Staff>> {
    Ok(Json(load(&state, id).await?))
}

/// Add a single badge; the code continues the location's sequence
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreateRequest>,
) -> AppResult<Json<Staff>> {
    let name = non_blank(Some(&payload.name)).ok_or_else(|| AppError::validation("name is required"))?;
    let location = Location::normalize(payload.location.as_deref().unwrap_or(""));
    let staff_type = StaffType::normalize(payload.staff_type.as_deref().unwrap_or(""));

    let code = roster::next_code(&state.staff, location, staff_type).await?;
    let mut staff = state
        .staff
        .create(StaffCreate {
            name,
            phone_number: non_blank(payload.phone_number.as_deref()).unwrap_or_else(|| "N/A".into()),
            booth_id: non_blank(payload.booth_id.as_deref()),
            location,
            staff_type,
            staff_code: code.into_string(),
            sold: payload.sold,
        })
        .await?;

    let path = state.qr.generate(&staff.staff_code)?.to_string_lossy().into_owned();
    state.staff.set_qr_path(staff.id, &path).await?;
    staff.qr_code_path = Some(path);

    tracing::info!(id = staff.id, code = %staff.staff_code, "Staff created");
    Ok(Json(staff))
}

/// Edit a booth through one of its badges and resize the group
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StaffEditRequest>,
) -> AppResult<Json<ResizeOutcome>> {
    let anchor = load(&state, id).await?;
    let mut fields = anchor.booth_fields();
    if let Some(name) = non_blank(payload.name.as_deref()) {
        fields.name = name;
    }
    if let Some(phone) = non_blank(payload.phone_number.as_deref()) {
        fields.phone_number = phone;
    }
    if let Some(booth_id) = payload.booth_id.as_deref() {
        fields.booth_id = non_blank(Some(booth_id));
    }
    if let Some(location) = payload.location.as_deref() {
        fields.location = Location::parse(location)
            .ok_or_else(|| AppError::validation(format!("Unknown location '{}'", location)))?;
    }
    if let Some(staff_type) = payload.staff_type.as_deref() {
        fields.staff_type = StaffType::normalize(staff_type);
    }

    let desired = count_text(payload.count.as_ref());
    let outcome = roster::resize(&state.staff, &state.qr, id, fields, &desired).await?;
    Ok(Json(outcome))
}

/// Delete a badge (its passes go with it)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.staff.delete(id).await? {
        return Err(AppError::staff_not_found(id));
    }
    tracing::info!(id, "Staff deleted");
    Ok(Json(ApiResponse::ok()))
}

pub async fn toggle_printed(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Staff>> {
    let staff = load(&state, id).await?;
    let updated = state
        .staff
        .update(id, StaffUpdate { printed: Some(!staff.printed), ..Default::default() })
        .await?;
    Ok(Json(updated))
}

pub async fn toggle_sold(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Staff>> {
    let staff = load(&state, id).await?;
    let updated = state
        .staff
        .update(id, StaffUpdate { sold: Some(!staff.sold), ..Default::default() })
        .await?;
    Ok(Json(updated))
}

pub async fn booths(State(state): State<ServerState>) -> AppResult<Json<Vec<BoothSummary>>> {
    Ok(Json(state.staff.booth_summaries().await?))
}

pub async fn list_passes(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Pass>>> {
    load(&state, id).await?;
    Ok(Json(pass::find_by_staff(&state.db, id).await?))
}

/// Check in: issue today's (or the given day's) pass. Body is optional.
pub async fn check_in(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Json<Pass>> {
    let request: CheckInRequest = if body.is_empty() {
        CheckInRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::invalid_request(format!("Invalid check-in body: {}", e)))?
    };
    let staff = load(&state, id).await?;
    let day = request.day_entered.unwrap_or_else(shared::util::today);
    let issued = passes::check_in(&state.db, &state.qr, &staff, day).await?;
    Ok(Json(issued))
}
