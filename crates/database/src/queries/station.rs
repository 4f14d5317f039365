use model::{line::Line, station::Station, WithId};
use sqlx::{Executor, Sqlite};
use transit::database::Result;
use utility::{geo::bounding_box, id::Id};

use super::{contains_pattern, convert_error};
use crate::data_model::{station::StationRow, with_id, with_ids};

// Repo

pub async fn get<'c, E>(executor: E, id: Id<Station>) -> Result<WithId<Station>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, line_id, district, opening_time, closing_time,
            latitude, longitude, image
        FROM estaciones
        WHERE id = ?1;
        ",
    )
    .bind(id.raw())
    .fetch_one(executor)
    .await
    .map(|row: StationRow| with_id(row))
    .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Station>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, line_id, district, opening_time, closing_time,
            latitude, longitude, image
        FROM estaciones
        ORDER BY id ASC;
        ",
    )
    .fetch_all(executor)
    .await
    .map(|rows: Vec<StationRow>| with_ids(rows))
    .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, station: Station) -> Result<WithId<Station>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        INSERT INTO estaciones(
            name,
            line_id,
            district,
            opening_time,
            closing_time,
            latitude,
            longitude,
            image
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        RETURNING
            id, name, line_id, district, opening_time, closing_time,
            latitude, longitude, image;
        ",
    )
    .bind(station.name)
    .bind(station.line_id.raw())
    .bind(station.district)
    .bind(station.opening_time)
    .bind(station.closing_time)
    .bind(station.location.latitude)
    .bind(station.location.longitude)
    .bind(station.image)
    .fetch_one(executor)
    .await
    .map(|row: StationRow| with_id(row))
    .map_err(convert_error)
}

pub async fn update<'c, E>(executor: E, station: WithId<Station>) -> Result<WithId<Station>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        UPDATE estaciones
        SET name = ?1,
            line_id = ?2,
            district = ?3,
            opening_time = ?4,
            closing_time = ?5,
            latitude = ?6,
            longitude = ?7,
            image = ?8
        WHERE id = ?9
        RETURNING
            id, name, line_id, district, opening_time, closing_time,
            latitude, longitude, image;
        ",
    )
    .bind(station.content.name)
    .bind(station.content.line_id.raw())
    .bind(station.content.district)
    .bind(station.content.opening_time)
    .bind(station.content.closing_time)
    .bind(station.content.location.latitude)
    .bind(station.content.location.longitude)
    .bind(station.content.image)
    .bind(station.id.raw())
    .fetch_one(executor)
    .await
    .map(|row: StationRow| with_id(row))
    .map_err(convert_error)
}

pub async fn delete<'c, E>(executor: E, id: Id<Station>) -> Result<bool>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query("DELETE FROM estaciones WHERE id = ?1;")
        .bind(id.raw())
        .execute(executor)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(convert_error)
}

pub async fn delete_all<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query("DELETE FROM estaciones;")
        .execute(executor)
        .await
        .map(|result| result.rows_affected())
        .map_err(convert_error)
}

pub async fn count<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM estaciones;")
        .fetch_one(executor)
        .await
        .map(|count: i64| count.max(0) as u64)
        .map_err(convert_error)
}

pub async fn exists<'c, E>(executor: E, id: Id<Station>) -> Result<bool>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM estaciones WHERE id = ?1);")
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

// Station Repo

pub async fn search<'c, E, S>(executor: E, pattern: S) -> Result<Vec<WithId<Station>>>
where
    E: Executor<'c, Database = Sqlite>,
    S: Into<String> + Send,
{
    // LIKE folds ascii case only
    sqlx::query_as(
        r"
        SELECT
            id, name, line_id, district, opening_time, closing_time,
            latitude, longitude, image
        FROM estaciones
        WHERE name LIKE ?1 ESCAPE '\' OR district LIKE ?1 ESCAPE '\'
        ORDER BY id ASC;
        ",
    )
    .bind(contains_pattern(&pattern.into()))
    .fetch_all(executor)
    .await
    .map(|rows: Vec<StationRow>| with_ids(rows))
    .map_err(convert_error)
}

pub async fn get_by_line<'c, E>(executor: E, line_id: &Id<Line>) -> Result<Vec<WithId<Station>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        SELECT
            id, name, line_id, district, opening_time, closing_time,
            latitude, longitude, image
        FROM estaciones
        WHERE line_id = ?1
        ORDER BY id ASC;
        ",
    )
    .bind(line_id.raw())
    .fetch_all(executor)
    .await
    .map(|rows: Vec<StationRow>| with_ids(rows))
    .map_err(convert_error)
}

pub async fn search_on_line<'c, E, S>(
    executor: E,
    pattern: S,
    line_id: &Id<Line>,
) -> Result<Vec<WithId<Station>>>
where
    E: Executor<'c, Database = Sqlite>,
    S: Into<String> + Send,
{
    sqlx::query_as(
        r"
        SELECT
            id, name, line_id, district, opening_time, closing_time,
            latitude, longitude, image
        FROM estaciones
        WHERE line_id = ?2
            AND (name LIKE ?1 ESCAPE '\' OR district LIKE ?1 ESCAPE '\')
        ORDER BY id ASC;
        ",
    )
    .bind(contains_pattern(&pattern.into()))
    .bind(line_id.raw())
    .fetch_all(executor)
    .await
    .map(|rows: Vec<StationRow>| with_ids(rows))
    .map_err(convert_error)
}

pub async fn find_nearby<'c, E>(
    executor: E,
    latitude: f64,
    longitude: f64,
    radius: f64,
) -> Result<Vec<WithId<Station>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let area = bounding_box(latitude, longitude, radius);
    sqlx::query_as(
        "
        SELECT
            id, name, line_id, district, opening_time, closing_time,
            latitude, longitude, image
        FROM estaciones
        WHERE latitude BETWEEN ?1 AND ?2
            AND longitude BETWEEN ?3 AND ?4
        ORDER BY id ASC;
        ",
    )
    .bind(area.min_latitude)
    .bind(area.max_latitude)
    .bind(area.min_longitude)
    .bind(area.max_longitude)
    .fetch_all(executor)
    .await
    .map(|rows: Vec<StationRow>| with_ids(rows))
    .map_err(convert_error)
}
