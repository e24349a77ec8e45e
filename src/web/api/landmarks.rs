use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Permission;
use crate::landmarks::{Landmark, ZoomRange};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::auth::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
pub struct LandmarksQuery {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl LandmarksQuery {
    fn zoom(&self) -> Result<Option<ZoomRange>, ApiError> {
        match (self.min, self.max) {
            (None, None) => Ok(None),
            (Some(min), Some(max)) if min <= max => Ok(Some(ZoomRange::new(min, max))),
            (Some(_), Some(_)) => Err(ApiError::Validation("min must not exceed max".into())),
            _ => Err(ApiError::Validation("min and max must be given together".into())),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LandmarksResponse {
    pub course: String,
    pub landmarks: Vec<Landmark>,
}

#[utoipa::path(
    get,
    path = "/api/landmarks/{course}",
    params(
        ("course" = String, Path, description = "Course identity, e.g. Spain"),
        ("min" = Option<f64>, Query, description = "Zoom window start (m)"),
        ("max" = Option<f64>, Query, description = "Zoom window end (m)")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Landmarks ordered by distance; empty for unknown courses", body = LandmarksResponse),
        (status = 400, description = "Invalid zoom window", body = ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient permissions")
    ),
    tag = "landmarks"
)]
pub async fn list_landmarks(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(course): Path<String>,
    Query(query): Query<LandmarksQuery>,
) -> ApiResult<Json<LandmarksResponse>> {
    user.require(Permission::ListLandmarks)?;

    let zoom = query.zoom()?;
    let landmarks = state.catalog.annotate(&course, zoom);

    Ok(Json(LandmarksResponse { course, landmarks }))
}
