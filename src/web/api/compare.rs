use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::analysis::{self, CompareRequest, Comparison};
use crate::config::Permission;
use crate::landmarks::ZoomRange;
use crate::laps::SessionKind;
use crate::session::SessionKey;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::auth::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompareBody {
    pub year: u16,
    pub event: String,
    pub session: SessionKind,
    pub driver_a: String,
    pub driver_b: String,
    #[serde(default)]
    pub lap: Option<u32>,
    #[serde(default)]
    pub zoom: Option<ZoomRange>,
}

#[utoipa::path(
    post,
    path = "/api/compare",
    request_body = CompareBody,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Aligned comparison of two laps", body = Comparison),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "Session, driver or lap not found", body = ErrorResponse)
    ),
    tag = "compare"
)]
pub async fn compare(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CompareBody>,
) -> ApiResult<Json<Comparison>> {
    user.require(Permission::Compare)?;

    if let Some(zoom) = body.zoom {
        if zoom.min > zoom.max {
            return Err(ApiError::Validation("zoom.min must not exceed zoom.max".into()));
        }
    }

    let key = SessionKey {
        year: body.year,
        event: body.event,
        kind: body.session,
    };
    let session = state.provider.load(&key)?;

    let request = CompareRequest {
        driver_a: body.driver_a,
        driver_b: body.driver_b,
        lap: body.lap,
        zoom: body.zoom,
    };
    let comparison = analysis::compare(
        &session,
        &request,
        &state.config.analysis_options(),
        &state.catalog,
    )?;

    log::info!(
        "{} compared {} vs {} in {}",
        user.name,
        comparison.lap_a.driver,
        comparison.lap_b.driver,
        key
    );
    Ok(Json(comparison))
}
