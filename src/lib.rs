pub mod auth;
pub mod classes;
pub mod error;
pub mod handlers;
pub mod ical;
pub mod models;
pub mod openapi;
pub mod ordering;
pub mod schedule;
pub mod settings;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use tokio::sync::RwLock;
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::classes::ClassCatalog;
use crate::handlers::{
    add_entry, create_class, delete_class, delete_entry, get_day, get_schedule, get_schedule_ical,
    healthz_live, healthz_ready, list_classes, reorder_classes, root, update_class, update_entry,
};
use crate::ical::ScheduleExporter;
use crate::openapi::ApiDoc;
use crate::schedule::WeeklySchedule;
use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub schedule: Arc<RwLock<WeeklySchedule>>,
    pub catalog: Arc<RwLock<ClassCatalog>>,
    pub exporter: Arc<ScheduleExporter>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let exporter = ScheduleExporter::new(
            settings.academy_name.clone(),
            settings.academy_location.clone(),
        );
        Self {
            settings,
            schedule: Arc::new(RwLock::new(WeeklySchedule::new())),
            catalog: Arc::new(RwLock::new(ClassCatalog::new())),
            exporter: Arc::new(exporter),
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState::new(settings);
    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Academy Schedule API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/schedule", get(get_schedule))
        .route("/schedule.ical", get(get_schedule_ical))
        .route("/schedule/{day}", get(get_day).post(add_entry))
        .route(
            "/schedule/{day}/{id}",
            axum::routing::patch(update_entry).delete(delete_entry),
        )
        .route("/classes", get(list_classes).post(create_class))
        .route("/classes/order", put(reorder_classes))
        .route(
            "/classes/{id}",
            axum::routing::patch(update_class).delete(delete_class),
        )
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    // The admin dashboard is served from a different origin.
    router.layer(CorsLayer::permissive()).layer(trace_layer)
}
