//! Shared fixtures: an in-memory observations database seeded with a small
//! two-station dataset whose newest reading is 2017-08-23.

#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use hilo::models::{Observation, Station};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Fresh in-memory database with the expected tables and no rows.
pub async fn empty_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    sqlx::query(
        "CREATE TABLE observations (
            station_id TEXT NOT NULL,
            date TEXT NOT NULL,
            precipitation REAL,
            temperature REAL NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .expect("create observations table");

    sqlx::query(
        "CREATE TABLE stations (
            station_id TEXT NOT NULL,
            name TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            elevation REAL NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .expect("create stations table");

    pool
}

pub fn fixture_stations() -> Vec<Station> {
    vec![
        Station {
            station_id: "USC00519281".to_string(),
            name: "WAIHEE 837.5, HI US".to_string(),
            latitude: 21.4517,
            longitude: -157.8489,
            elevation: 32.9,
        },
        Station {
            station_id: "USC00516128".to_string(),
            name: "MANOA LYON ARBO 785.2, HI US".to_string(),
            latitude: 21.3331,
            longitude: -157.8025,
            elevation: 152.4,
        },
    ]
}

pub fn fixture_observations() -> Vec<Observation> {
    vec![
        // Old reading, outside the trailing-year window but visible to normals
        Observation {
            station_id: "USC00519281".to_string(),
            date: date(2016, 1, 5),
            precipitation: Some(0.1),
            temperature: 68.0,
        },
        Observation {
            station_id: "USC00519281".to_string(),
            date: date(2017, 8, 21),
            precipitation: Some(0.5),
            temperature: 78.0,
        },
        Observation {
            station_id: "USC00516128".to_string(),
            date: date(2017, 8, 21),
            precipitation: Some(1.2),
            temperature: 74.0,
        },
        Observation {
            station_id: "USC00519281".to_string(),
            date: date(2017, 8, 22),
            precipitation: Some(0.0),
            temperature: 76.0,
        },
        Observation {
            station_id: "USC00516128".to_string(),
            date: date(2017, 8, 22),
            precipitation: None,
            temperature: 71.0,
        },
        Observation {
            station_id: "USC00519281".to_string(),
            date: date(2017, 8, 23),
            precipitation: Some(0.45),
            temperature: 81.0,
        },
        Observation {
            station_id: "USC00516128".to_string(),
            date: date(2017, 8, 23),
            precipitation: Some(0.7),
            temperature: 76.0,
        },
    ]
}

pub async fn insert_station(pool: &SqlitePool, station: &Station) {
    sqlx::query(
        "INSERT INTO stations (station_id, name, latitude, longitude, elevation) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&station.station_id)
    .bind(&station.name)
    .bind(station.latitude)
    .bind(station.longitude)
    .bind(station.elevation)
    .execute(pool)
    .await
    .expect("insert station");
}

pub async fn insert_observation(pool: &SqlitePool, obs: &Observation) {
    sqlx::query(
        "INSERT INTO observations (station_id, date, precipitation, temperature) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(&obs.station_id)
    .bind(obs.date)
    .bind(obs.precipitation)
    .bind(obs.temperature)
    .execute(pool)
    .await
    .expect("insert observation");
}

/// In-memory database populated with the standard fixture dataset.
pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    for station in fixture_stations() {
        insert_station(&pool, &station).await;
    }
    for obs in fixture_observations() {
        insert_observation(&pool, &obs).await;
    }
    pool
}
