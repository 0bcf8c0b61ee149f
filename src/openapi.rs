use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    ClassProgram, ClassProgramPatch, Day, DayListing, Level, NewClassProgram, NewScheduleEntry,
    OrderAssignment, ScheduleEntry, ScheduleEntryPatch, WeekListing,
};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .build(),
            ),
        );
        components.add_security_scheme(
            "query_token",
            SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::new("token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_schedule,
        crate::handlers::get_day,
        crate::handlers::get_schedule_ical,
        crate::handlers::add_entry,
        crate::handlers::update_entry,
        crate::handlers::delete_entry,
        crate::handlers::list_classes,
        crate::handlers::create_class,
        crate::handlers::update_class,
        crate::handlers::delete_class,
        crate::handlers::reorder_classes
    ),
    components(schemas(
        Day,
        Level,
        ScheduleEntry,
        NewScheduleEntry,
        ScheduleEntryPatch,
        DayListing,
        WeekListing,
        ClassProgram,
        NewClassProgram,
        ClassProgramPatch,
        OrderAssignment
    )),
    tags(
        (name = "schedule", description = "Weekly class schedule operations"),
        (name = "classes", description = "Class catalog and display ordering"),
        (name = "health", description = "Liveness and readiness probes")
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;
