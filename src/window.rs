//! Date-window resolution and the bounded observation queries.
//!
//! Every operation takes the pool explicitly; a connection is acquired per
//! query and released when the future completes.

use chrono::{Days, NaiveDate};
use sqlx::{FromRow, SqlitePool};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::Result;
use crate::error::HiloError;
use crate::models::{
    DailyNormals, PrecipitationEntry, StationSummary, TemperatureObservation, TemperatureSummary,
};

/// Length of the trailing window resolved against the newest observation.
pub const TRAILING_WINDOW_DAYS: u64 = 365;

/// An inclusive date range `[start, end]` used to filter observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// How same-date rows from different stations are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationMode {
    /// Keep one entry per `(date, station)` pair.
    PerStation,
    /// Keep one entry per date; later rows overwrite earlier ones.
    CollapsePerDate,
}

/// Parse a caller-supplied `YYYY-MM-DD` date string.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| HiloError::malformed_date(input))
}

/// Parse and normalize a caller-supplied `MM-DD` day-of-year string.
///
/// Anchored to a leap year so `02-29` is accepted; the returned string is
/// zero-padded to match `strftime('%m-%d', ...)` output.
pub fn parse_month_day(input: &str) -> Result<String> {
    let anchored = format!("2000-{input}");
    let date =
        NaiveDate::parse_from_str(&anchored, "%Y-%m-%d").map_err(|_| HiloError::malformed_date(input))?;
    Ok(date.format("%m-%d").to_string())
}

/// Resolve the trailing-year window ending at the newest observation date.
#[instrument(skip(pool))]
pub async fn resolve_latest_year_window(pool: &SqlitePool) -> Result<DateWindow> {
    let latest: Option<NaiveDate> = sqlx::query_scalar("SELECT max(date) FROM observations")
        .fetch_one(pool)
        .await?;

    let end = latest.ok_or(HiloError::EmptyDataset)?;
    let start = end
        .checked_sub_days(Days::new(TRAILING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);

    debug!("Resolved trailing-year window {} to {}", start, end);
    Ok(DateWindow { start, end })
}

/// Per-date min/avg/max temperature for dates in `[start, end]`, ascending.
///
/// An absent `end` leaves the upper bound open. Returns an empty vector
/// (not an error) when no dates match.
#[instrument(skip(pool))]
pub async fn aggregate_temperature(
    pool: &SqlitePool,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<Vec<TemperatureSummary>> {
    let rows = match end {
        Some(end) => {
            sqlx::query_as::<_, TemperatureSummary>(
                "SELECT date, min(temperature) AS tmin, avg(temperature) AS tavg, \
                 max(temperature) AS tmax \
                 FROM observations WHERE date >= ? AND date <= ? \
                 GROUP BY date ORDER BY date",
            )
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, TemperatureSummary>(
                "SELECT date, min(temperature) AS tmin, avg(temperature) AS tavg, \
                 max(temperature) AS tmax \
                 FROM observations WHERE date >= ? \
                 GROUP BY date ORDER BY date",
            )
            .bind(start)
            .fetch_all(pool)
            .await?
        }
    };

    debug!("Aggregated temperatures for {} dates", rows.len());
    Ok(rows)
}

/// Precipitation readings within the window, ascending by date then station.
#[instrument(skip(pool))]
pub async fn precipitation_by_date(
    pool: &SqlitePool,
    window: DateWindow,
    mode: PrecipitationMode,
) -> Result<Vec<PrecipitationEntry>> {
    let rows = sqlx::query_as::<_, PrecipitationEntry>(
        "SELECT date, station_id, precipitation FROM observations \
         WHERE date >= ? AND date <= ? ORDER BY date, station_id",
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_all(pool)
    .await?;

    match mode {
        PrecipitationMode::PerStation => Ok(rows),
        PrecipitationMode::CollapsePerDate => {
            let mut by_date: BTreeMap<NaiveDate, PrecipitationEntry> = BTreeMap::new();
            for row in rows {
                by_date.insert(row.date, row);
            }
            Ok(by_date.into_values().collect())
        }
    }
}

/// Raw `(date, temperature)` readings within the window, ascending by date.
#[instrument(skip(pool))]
pub async fn temperature_observations(
    pool: &SqlitePool,
    window: DateWindow,
) -> Result<Vec<TemperatureObservation>> {
    let rows = sqlx::query_as::<_, TemperatureObservation>(
        "SELECT date, temperature FROM observations \
         WHERE date >= ? AND date <= ? ORDER BY date",
    )
    .bind(window.start)
    .bind(window.end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[derive(FromRow)]
struct NormalsRow {
    tmin: Option<f64>,
    tavg: Option<f64>,
    tmax: Option<f64>,
}

/// Min/avg/max temperature for one `MM-DD` day of the year, across all years.
///
/// Returns `None` when no observation falls on that day of the year.
#[instrument(skip(pool))]
pub async fn daily_normals(pool: &SqlitePool, month_day: &str) -> Result<Option<DailyNormals>> {
    let month_day = parse_month_day(month_day)?;

    let row: NormalsRow = sqlx::query_as(
        "SELECT min(temperature) AS tmin, avg(temperature) AS tavg, \
         max(temperature) AS tmax \
         FROM observations WHERE strftime('%m-%d', date) = ?",
    )
    .bind(&month_day)
    .fetch_one(pool)
    .await?;

    match (row.tmin, row.tavg, row.tmax) {
        (Some(tmin), Some(tavg), Some(tmax)) => Ok(Some(DailyNormals { tmin, tavg, tmax })),
        _ => Ok(None),
    }
}

/// Every station's `(station_id, name)` pair, ordered by station id.
#[instrument(skip(pool))]
pub async fn list_stations(pool: &SqlitePool) -> Result<Vec<StationSummary>> {
    let rows = sqlx::query_as::<_, StationSummary>(
        "SELECT station_id, name FROM stations ORDER BY station_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
