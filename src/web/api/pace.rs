use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis;
use crate::config::Permission;
use crate::laps::{PaceFilter, PacePoint, SessionKind};
use crate::session::SessionKey;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::auth::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaceBody {
    pub year: u16,
    pub event: String,
    pub session: SessionKind,
    pub driver: String,
    #[serde(default)]
    pub compound: Option<String>,
    #[serde(default)]
    pub stint: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaceResponse {
    pub driver: String,
    pub points: Vec<PacePoint>,
}

#[utoipa::path(
    post,
    path = "/api/pace",
    request_body = PaceBody,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Quick-lap pace by lap number", body = PaceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "Session or driver not found", body = ErrorResponse)
    ),
    tag = "pace"
)]
pub async fn race_pace(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<PaceBody>,
) -> ApiResult<Json<PaceResponse>> {
    user.require(Permission::ViewPace)?;

    let key = SessionKey {
        year: body.year,
        event: body.event,
        kind: body.session,
    };
    if !key.kind.is_race() {
        log::debug!("Pace requested for non-race session {}", key);
    }
    let session = state.provider.load(&key)?;

    let filter = PaceFilter {
        compound: body.compound,
        stint: body.stint,
    };
    let points = analysis::pace(&session, &body.driver, &filter)?;

    Ok(Json(PaceResponse {
        driver: body.driver,
        points,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::api::test_support::{state, user};

    fn body(driver: &str) -> PaceBody {
        PaceBody {
            year: 2024,
            event: "Spain".into(),
            session: SessionKind::Race,
            driver: driver.into(),
            compound: Some("soft".into()),
            stint: Some(1),
        }
    }

    #[tokio::test]
    async fn test_pace_points() {
        let Json(out) = race_pace(State(state()), user(&[Permission::ViewPace]), Json(body("NOR")))
            .await
            .ok()
            .unwrap();
        let laps: Vec<u32> = out.points.iter().map(|p| p.lap_number).collect();
        assert_eq!(laps, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_pace_unknown_driver() {
        let result = race_pace(State(state()), user(&[Permission::ViewPace]), Json(body("HAM"))).await;
        assert!(result.is_err());
    }
}
