use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    auth::verify_token,
    error::ApiError,
    models::{
        ClassProgram, ClassProgramPatch, Day, DayListing, NewClassProgram, NewScheduleEntry,
        OrderAssignment, ScheduleEntryPatch, WeekListing,
    },
    validation::{validate_entry_patch, validate_new_entry, validate_program_name},
};

#[derive(Debug, serde::Deserialize)]
pub struct AuthQuery {
    pub token: Option<String>,
}

type AuthHeader = Option<TypedHeader<Authorization<Bearer>>>;

fn authorize(state: &AppState, auth: AuthHeader, query: &AuthQuery) -> Result<(), ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())
}

#[utoipa::path(get, path = "/", tag = "schedule")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Academy Schedule API",
        "endpoints": {
            "/schedule": "Full weekly schedule as JSON",
            "/schedule.ical": "Weekly schedule as an iCal feed",
            "/schedule/{day}": "One day's schedule; POST to add an entry",
            "/classes": "Class catalog in display order"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "health")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "health")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/schedule",
    responses((status = 200, description = "All seven days, active entries sorted by start time", body = WeekListing)),
    tag = "schedule"
)]
pub async fn get_schedule(State(state): State<AppState>) -> impl IntoResponse {
    let schedule = state.schedule.read().await;
    Json(schedule.list_all())
}

#[utoipa::path(
    get,
    path = "/schedule/{day}",
    params(("day" = String, Path, description = "Day of the week, lowercase")),
    responses(
        (status = 200, description = "Active entries for the day, sorted by start time", body = DayListing),
        (status = 400, description = "Unknown day name")
    ),
    tag = "schedule"
)]
pub async fn get_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let day = Day::parse(&day)?;
    let schedule = state.schedule.read().await;
    Ok(Json(DayListing {
        day,
        entries: schedule.list_for_day(day),
    }))
}

#[utoipa::path(
    get,
    path = "/schedule.ical",
    responses(
        (status = 200, description = "iCal feed of the current week", content_type = "text/calendar"),
        (status = 404, description = "No classes scheduled")
    ),
    tag = "schedule"
)]
pub async fn get_schedule_ical(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let week = state.schedule.read().await.list_all();
    if week.is_empty() {
        return Err(ApiError::NotFound("No classes scheduled".into()));
    }
    let body = state.exporter.generate(&week);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=weekly_schedule.ics",
            ),
        ],
        body,
    ))
}

#[utoipa::path(
    post,
    path = "/schedule/{day}",
    params(
        ("day" = String, Path, description = "Day of the week, lowercase"),
        ("token" = Option<String>, Query, description = "Admin token (alternative to Bearer header)")
    ),
    request_body = NewScheduleEntry,
    responses(
        (status = 201, description = "Updated listing for the day", body = DayListing),
        (status = 400, description = "Unknown day or invalid entry fields"),
        (status = 401, description = "Invalid authentication token"),
        (status = 409, description = "Time conflict with an existing entry")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "schedule"
)]
pub async fn add_entry(
    State(state): State<AppState>,
    Path(day): Path<String>,
    auth: AuthHeader,
    Query(query): Query<AuthQuery>,
    Json(body): Json<NewScheduleEntry>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &query)?;
    let day = Day::parse(&day)?;
    validate_new_entry(&body)?;

    // Hold the write lock across check and commit so two concurrent adds
    // cannot both pass the overlap test against a stale view.
    let mut schedule = state.schedule.write().await;
    let entry = schedule.add_entry(day, body)?;
    info!(
        "scheduled '{}' on {} at {} - {}",
        entry.class_name,
        day.as_str(),
        entry.start_time,
        entry.end_time
    );
    Ok((
        StatusCode::CREATED,
        Json(DayListing {
            day,
            entries: schedule.list_for_day(day),
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/schedule/{day}/{id}",
    params(
        ("day" = String, Path, description = "Day of the week, lowercase"),
        ("id" = String, Path, description = "Entry id"),
        ("token" = Option<String>, Query, description = "Admin token (alternative to Bearer header)")
    ),
    request_body = ScheduleEntryPatch,
    responses(
        (status = 200, description = "Updated listing for the day", body = DayListing),
        (status = 400, description = "Unknown day or invalid patch fields"),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "No entry with that id on that day"),
        (status = 409, description = "Time conflict with another entry")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "schedule"
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Path((day, id)): Path<(String, Uuid)>,
    auth: AuthHeader,
    Query(query): Query<AuthQuery>,
    Json(body): Json<ScheduleEntryPatch>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &query)?;
    let day = Day::parse(&day)?;
    validate_entry_patch(&body)?;

    let mut schedule = state.schedule.write().await;
    schedule.update_entry(day, id, body)?;
    Ok(Json(DayListing {
        day,
        entries: schedule.list_for_day(day),
    }))
}

#[utoipa::path(
    delete,
    path = "/schedule/{day}/{id}",
    params(
        ("day" = String, Path, description = "Day of the week, lowercase"),
        ("id" = String, Path, description = "Entry id"),
        ("token" = Option<String>, Query, description = "Admin token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "Updated listing for the day", body = DayListing),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "No entry with that id on that day")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "schedule"
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path((day, id)): Path<(String, Uuid)>,
    auth: AuthHeader,
    Query(query): Query<AuthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &query)?;
    let day = Day::parse(&day)?;

    let mut schedule = state.schedule.write().await;
    schedule.remove_entry(day, id)?;
    info!("removed entry {id} from {}", day.as_str());
    Ok(Json(DayListing {
        day,
        entries: schedule.list_for_day(day),
    }))
}

#[utoipa::path(
    get,
    path = "/classes",
    responses((status = 200, description = "Active class programs in display order", body = [ClassProgram])),
    tag = "classes"
)]
pub async fn list_classes(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.read().await;
    Json(catalog.list())
}

#[utoipa::path(
    post,
    path = "/classes",
    params(("token" = Option<String>, Query, description = "Admin token (alternative to Bearer header)")),
    request_body = NewClassProgram,
    responses(
        (status = 201, description = "Created program", body = ClassProgram),
        (status = 400, description = "Invalid program fields"),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn create_class(
    State(state): State<AppState>,
    auth: AuthHeader,
    Query(query): Query<AuthQuery>,
    Json(body): Json<NewClassProgram>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &query)?;
    validate_program_name(&body.name)?;

    let mut catalog = state.catalog.write().await;
    let program = catalog.create(body);
    info!("created class program '{}'", program.name);
    Ok((StatusCode::CREATED, Json(program)))
}

#[utoipa::path(
    patch,
    path = "/classes/{id}",
    params(
        ("id" = String, Path, description = "Program id"),
        ("token" = Option<String>, Query, description = "Admin token (alternative to Bearer header)")
    ),
    request_body = ClassProgramPatch,
    responses(
        (status = 200, description = "Updated program", body = ClassProgram),
        (status = 400, description = "Invalid patch fields"),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "No program with that id")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthHeader,
    Query(query): Query<AuthQuery>,
    Json(body): Json<ClassProgramPatch>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &query)?;
    if let Some(name) = &body.name {
        validate_program_name(name)?;
    }

    let mut catalog = state.catalog.write().await;
    let program = catalog.update(id, body)?;
    Ok(Json(program))
}

#[utoipa::path(
    delete,
    path = "/classes/{id}",
    params(
        ("id" = String, Path, description = "Program id"),
        ("token" = Option<String>, Query, description = "Admin token (alternative to Bearer header)")
    ),
    responses(
        (status = 204, description = "Program removed"),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "No program with that id")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthHeader,
    Query(query): Query<AuthQuery>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &query)?;

    let mut catalog = state.catalog.write().await;
    catalog.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/classes/order",
    params(("token" = Option<String>, Query, description = "Admin token (alternative to Bearer header)")),
    request_body = [OrderAssignment],
    responses(
        (status = 200, description = "Catalog after renumbering", body = [ClassProgram]),
        (status = 401, description = "Invalid authentication token")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn reorder_classes(
    State(state): State<AppState>,
    auth: AuthHeader,
    Query(query): Query<AuthQuery>,
    Json(body): Json<Vec<OrderAssignment>>,
) -> Result<impl IntoResponse, ApiError> {
    authorize(&state, auth, &query)?;

    let mut catalog = state.catalog.write().await;
    let programs = catalog.reorder(&body);
    info!("reordered class catalog ({} programs)", programs.len());
    Ok(Json(programs))
}
