use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use super::api::compare::CompareBody;
use super::api::error::ErrorResponse;
use super::api::landmarks::LandmarksResponse;
use super::api::pace::{PaceBody, PaceResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::compare::compare,
        super::api::landmarks::list_landmarks,
        super::api::pace::race_pace,
    ),
    components(
        schemas(
            CompareBody,
            PaceBody,
            PaceResponse,
            LandmarksResponse,
            ErrorResponse,
            crate::analysis::Comparison,
            crate::telemetry::ResampledTrace,
            crate::telemetry::DeltaSeries,
            crate::telemetry::PositionedValue,
            crate::telemetry::Channel,
            crate::landmarks::Landmark,
            crate::landmarks::ZoomRange,
            crate::laps::LapSummary,
            crate::laps::SectorDelta,
            crate::laps::PacePoint,
            crate::laps::SessionKind,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "lap-delta API",
        description = "Distance-aligned lap comparison",
        version = "0.1.0"
    ),
    tags(
        (name = "compare", description = "Two-lap alignment and deltas"),
        (name = "landmarks", description = "Course landmarks"),
        (name = "pace", description = "Race pace by lap")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
