//! HTTP surface for the observation queries
//!
//! Thin glue: every handler resolves a window, runs one query operation and
//! maps the rows into response DTOs.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::HiloError;
use crate::models::{
    DailyNormals, PrecipitationEntry, StationSummary, TemperatureObservation, TemperatureSummary,
};
use crate::window::{self, PrecipitationMode};

/// Shared handler state; the pool is the only dependency handlers need.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// Error wrapper that maps query failures onto HTTP statuses.
pub struct ApiError(HiloError);

impl From<HiloError> for ApiError {
    fn from(err: HiloError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HiloError::MalformedDate { .. } => StatusCode::BAD_REQUEST,
            HiloError::EmptyDataset => StatusCode::NOT_FOUND,
            HiloError::Storage { .. } | HiloError::SchemaMismatch { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            HiloError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

#[derive(Serialize, Deserialize)]
pub struct ApiPrecipitation {
    pub date: String,
    pub station: String,
    pub precipitation: Option<f64>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiStation {
    pub station_id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiTemperatureObservation {
    pub date: String,
    pub temperature: f64,
}

#[derive(Serialize, Deserialize)]
pub struct ApiTemperatureSummary {
    pub date: String,
    pub tmin: f64,
    pub tavg: f64,
    pub tmax: f64,
}

#[derive(Serialize, Deserialize)]
pub struct ApiDailyNormals {
    pub tmin: f64,
    pub tavg: f64,
    pub tmax: f64,
}

impl From<&PrecipitationEntry> for ApiPrecipitation {
    fn from(entry: &PrecipitationEntry) -> Self {
        Self {
            date: entry.date.to_string(),
            station: entry.station_id.clone(),
            precipitation: entry.precipitation,
        }
    }
}

impl From<&StationSummary> for ApiStation {
    fn from(station: &StationSummary) -> Self {
        Self {
            station_id: station.station_id.clone(),
            name: station.name.clone(),
        }
    }
}

impl From<&TemperatureObservation> for ApiTemperatureObservation {
    fn from(obs: &TemperatureObservation) -> Self {
        Self {
            date: obs.date.to_string(),
            temperature: obs.temperature,
        }
    }
}

impl From<&TemperatureSummary> for ApiTemperatureSummary {
    fn from(summary: &TemperatureSummary) -> Self {
        Self {
            date: summary.date.to_string(),
            tmin: summary.tmin,
            tavg: summary.tavg,
            tmax: summary.tmax,
        }
    }
}

impl From<&DailyNormals> for ApiDailyNormals {
    fn from(normals: &DailyNormals) -> Self {
        Self {
            tmin: normals.tmin,
            tavg: normals.tavg,
            tmax: normals.tmax,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/precipitation", get(get_precipitation))
        .route("/stations", get(get_stations))
        .route("/tobs", get(get_tobs))
        .route("/temp/{start}", get(get_temp_from))
        .route("/temp/{start}/{end}", get(get_temp_range))
        .route("/normals/{month_day}", get(get_normals))
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({
        "service": "hilo",
        "version": crate::VERSION,
        "routes": [
            "/precipitation",
            "/stations",
            "/tobs",
            "/temp/{start}",
            "/temp/{start}/{end}",
            "/normals/{month_day}",
        ],
    }))
}

async fn get_precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiPrecipitation>>, ApiError> {
    let window = window::resolve_latest_year_window(&state.pool).await?;
    let entries =
        window::precipitation_by_date(&state.pool, window, PrecipitationMode::PerStation).await?;
    Ok(Json(entries.iter().map(ApiPrecipitation::from).collect()))
}

async fn get_stations(State(state): State<AppState>) -> Result<Json<Vec<ApiStation>>, ApiError> {
    let stations = window::list_stations(&state.pool).await?;
    Ok(Json(stations.iter().map(ApiStation::from).collect()))
}

async fn get_tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiTemperatureObservation>>, ApiError> {
    let window = window::resolve_latest_year_window(&state.pool).await?;
    let observations = window::temperature_observations(&state.pool, window).await?;
    Ok(Json(
        observations
            .iter()
            .map(ApiTemperatureObservation::from)
            .collect(),
    ))
}

async fn get_temp_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<ApiTemperatureSummary>>, ApiError> {
    let start = window::parse_iso_date(&start)?;
    let summaries = window::aggregate_temperature(&state.pool, start, None).await?;
    Ok(Json(
        summaries.iter().map(ApiTemperatureSummary::from).collect(),
    ))
}

async fn get_temp_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<ApiTemperatureSummary>>, ApiError> {
    let start = window::parse_iso_date(&start)?;
    let end = window::parse_iso_date(&end)?;
    let summaries = window::aggregate_temperature(&state.pool, start, Some(end)).await?;
    Ok(Json(
        summaries.iter().map(ApiTemperatureSummary::from).collect(),
    ))
}

async fn get_normals(
    State(state): State<AppState>,
    Path(month_day): Path<String>,
) -> Result<Response, ApiError> {
    match window::daily_normals(&state.pool, &month_day).await? {
        Some(normals) => Ok(Json(ApiDailyNormals::from(&normals)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("no observations recorded on {month_day}") })),
        )
            .into_response()),
    }
}
