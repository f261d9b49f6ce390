//! REST API handlers for the Wayfinder server

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use wayfinder_data::{route_segments, DataError, RouteSegment};

use crate::ServerState;

/// Query string for `/find-path`
#[derive(Debug, Deserialize)]
pub struct FindPathQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Errors a client can cause, each mapped to a status code
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("must have {0}")]
    MissingParameter(&'static str),

    #[error("unknown building: {0}")]
    UnknownBuilding(String),

    #[error("no path found")]
    NoPath,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::UnknownBuilding(name) => ApiError::UnknownBuilding(name),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingParameter(_) | ApiError::UnknownBuilding(_) => StatusCode::BAD_REQUEST,
            ApiError::NoPath => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("Request failed ({}): {}", status, self);
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Shortest walking route between two buildings as drawable segments
pub async fn find_path(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<FindPathQuery>,
) -> Result<Json<Vec<RouteSegment>>, ApiError> {
    let start = query.start.ok_or(ApiError::MissingParameter("start"))?;
    let end = query.end.ok_or(ApiError::MissingParameter("end"))?;

    let campus = state.campus.read().await;
    let path = campus
        .find_shortest_path(&start, &end)?
        .ok_or(ApiError::NoPath)?;

    debug!("Route {} -> {}: {} segments, cost {:.3}", start, end, path.len(), path.cost());
    Ok(Json(route_segments(&path)))
}

/// Every building, short name to long name
pub async fn get_buildings(State(state): State<Arc<ServerState>>) -> Json<BTreeMap<String, String>> {
    let campus = state.campus.read().await;
    Json(campus.building_names())
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(health)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::create_router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wayfinder_data::{BuildingRecord, CampusMap, PathRecord};

    fn building(short: &str, long: &str, x: f64, y: f64) -> BuildingRecord {
        BuildingRecord {
            short_name: short.to_string(),
            long_name: long.to_string(),
            x,
            y,
        }
    }

    fn walkway(x1: f64, y1: f64, x2: f64, y2: f64, distance: f64) -> PathRecord {
        PathRecord {
            x1,
            y1,
            x2,
            y2,
            distance: Some(distance),
        }
    }

    fn test_state() -> Arc<ServerState> {
        let campus = CampusMap::from_records(
            vec![
                building("CSE", "Paul G. Allen Center", 0.0, 0.0),
                building("MGH", "Mary Gates Hall", 10.0, 0.0),
                building("ISO", "Isolated Hall", 50.0, 50.0),
            ],
            vec![
                walkway(0.0, 0.0, 5.0, 0.0, 5.0),
                walkway(5.0, 0.0, 10.0, 0.0, 5.0),
            ],
        )
        .unwrap();
        Arc::new(ServerState::new(campus))
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let app = create_router(test_state());
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_find_path_returns_segments() {
        let (status, body) = get("/find-path?start=CSE&end=MGH").await;
        assert_eq!(status, StatusCode::OK);
        insta::assert_snapshot!(
            body,
            @r#"[{"x1":0.0,"y1":0.0,"x2":5.0,"y2":0.0,"cost":5.0},{"x1":5.0,"y1":0.0,"x2":10.0,"y2":0.0,"cost":5.0}]"#
        );
    }

    #[tokio::test]
    async fn test_find_path_missing_parameter() {
        let (status, body) = get("/find-path?start=CSE").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("must have end"));
    }

    #[tokio::test]
    async fn test_find_path_unknown_building() {
        let (status, body) = get("/find-path?start=CSE&end=XYZ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("unknown building: XYZ"));
    }

    #[tokio::test]
    async fn test_find_path_unreachable() {
        let (status, body) = get("/find-path?start=CSE&end=ISO").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"no path found"}"#);
    }

    #[tokio::test]
    async fn test_get_buildings() {
        let (status, body) = get("/get-buildings").await;
        assert_eq!(status, StatusCode::OK);
        insta::assert_snapshot!(
            body,
            @r#"{"CSE":"Paul G. Allen Center","ISO":"Isolated Hall","MGH":"Mary Gates Hall"}"#
        );
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""status":"ok""#));
    }
}
