//! JSON-over-HTTP boundary.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Json,
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    core::{
        calculator::CostError,
        comparison::Recommendation,
        reading::{MeterReadings, Reading},
        service::{Comparison, EnergyService, InvalidInput},
    },
    prelude::*,
    quantity::cost::Cost,
};

pub fn router(service: Arc<EnergyService>) -> Router {
    Router::new()
        .route("/readings/store", post(store_readings))
        .route("/readings/read/{smart_meter_id}", get(read_readings))
        .route("/price-plans/compare-all/{smart_meter_id}", get(compare_all))
        .route("/price-plans/recommend/{smart_meter_id}", get(recommend))
        .with_state(service)
        .layer((TraceLayer::new_for_http(), TimeoutLayer::new(Duration::from_secs(10))))
}

#[derive(Debug)]
enum ApiError {
    NotFound,
    InvalidInput(InvalidInput),
    Cost(CostError),
}

impl From<InvalidInput> for ApiError {
    fn from(error: InvalidInput) -> Self {
        Self::InvalidInput(error)
    }
}

impl From<CostError> for ApiError {
    fn from(error: CostError) -> Self {
        Self::Cost(error)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "no readings for the smart meter".to_owned()),
            Self::InvalidInput(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            Self::Cost(error) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[instrument(skip_all)]
async fn store_readings(
    State(service): State<Arc<EnergyService>>,
    Json(body): Json<MeterReadings>,
) -> Result<StatusCode, ApiError> {
    service
        .store_readings(body.smart_meter_id.as_deref(), body.electricity_readings)
        .inspect_err(|error| warn!("rejected readings: {error}"))?;
    Ok(StatusCode::OK)
}

#[instrument(skip_all, fields(smart_meter_id = %smart_meter_id))]
async fn read_readings(
    State(service): State<Arc<EnergyService>>,
    Path(smart_meter_id): Path<String>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    service.get_readings(&smart_meter_id).map(Json).ok_or(ApiError::NotFound)
}

#[instrument(skip_all, fields(smart_meter_id = %smart_meter_id))]
async fn compare_all(
    State(service): State<Arc<EnergyService>>,
    Path(smart_meter_id): Path<String>,
) -> Result<Json<Comparison>, ApiError> {
    service.compare_all(&smart_meter_id)?.map(Json).ok_or(ApiError::NotFound)
}

#[derive(Deserialize)]
struct RecommendQuery {
    limit: Option<i64>,
}

/// Each recommendation is rendered as a single-entry `{plan: cost}` object.
#[instrument(skip_all, fields(smart_meter_id = %smart_meter_id, limit = ?query.limit))]
async fn recommend(
    State(service): State<Arc<EnergyService>>,
    Path(smart_meter_id): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Result<Json<Vec<HashMap<String, Cost>>>, ApiError> {
    let recommendations =
        service.recommend(&smart_meter_id, query.limit)?.ok_or(ApiError::NotFound)?;
    Ok(Json(
        recommendations
            .into_iter()
            .map(|Recommendation { plan_name, cost }| HashMap::from([(plan_name, cost)]))
            .collect(),
    ))
}
