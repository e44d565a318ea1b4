//! Row types for the observations database and query result shapes

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

// Database entity models

/// A single station/date precipitation and temperature reading.
/// Identity is `(station_id, date)`; the dataset is read-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Observation {
    pub station_id: String,
    pub date: NaiveDate,
    pub precipitation: Option<f64>,
    pub temperature: f64,
}

/// Metadata for a fixed weather-recording location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

// Query result shapes

/// Per-date temperature aggregate over a window.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemperatureSummary {
    pub date: NaiveDate,
    pub tmin: f64,
    pub tavg: f64,
    pub tmax: f64,
}

/// A single `(date, temperature)` reading within a window.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemperatureObservation {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// A precipitation reading within a window.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrecipitationEntry {
    pub date: NaiveDate,
    pub station_id: String,
    pub precipitation: Option<f64>,
}

/// The `(station_id, name)` projection served by the stations listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StationSummary {
    pub station_id: String,
    pub name: String,
}

/// Min/avg/max temperature for one day of the year, across all years.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyNormals {
    pub tmin: f64,
    pub tavg: f64,
    pub tmax: f64,
}
