use model::{line::Line, WithId};
use sqlx::{Executor, Sqlite};
use transit::database::Result;
use utility::id::Id;

use super::convert_error;
use crate::data_model::{
    line::{LineRow, RowLineStatus},
    with_id, with_ids,
};

// Repo

pub async fn get<'c, E>(executor: E, id: Id<Line>) -> Result<WithId<Line>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        SELECT id, name, number, color_hex, status, description, start_station, end_station
        FROM lineas
        WHERE id = ?1;
        ",
    )
    .bind(id.raw())
    .fetch_one(executor)
    .await
    .map(|row: LineRow| with_id(row))
    .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Line>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        SELECT id, name, number, color_hex, status, description, start_station, end_station
        FROM lineas
        ORDER BY number ASC, id ASC;
        ",
    )
    .fetch_all(executor)
    .await
    .map(|rows: Vec<LineRow>| with_ids(rows))
    .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, line: Line) -> Result<WithId<Line>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        INSERT INTO lineas(
            name,
            number,
            color_hex,
            status,
            description,
            start_station,
            end_station
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        RETURNING id, name, number, color_hex, status, description, start_station, end_station;
        ",
    )
    .bind(line.name)
    .bind(line.number)
    .bind(line.color_hex)
    .bind(RowLineStatus::from_line_status(line.status))
    .bind(line.description)
    .bind(line.start_station)
    .bind(line.end_station)
    .fetch_one(executor)
    .await
    .map(|row: LineRow| with_id(row))
    .map_err(convert_error)
}

pub async fn update<'c, E>(executor: E, line: WithId<Line>) -> Result<WithId<Line>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        UPDATE lineas
        SET name = ?1,
            number = ?2,
            color_hex = ?3,
            status = ?4,
            description = ?5,
            start_station = ?6,
            end_station = ?7
        WHERE id = ?8
        RETURNING id, name, number, color_hex, status, description, start_station, end_station;
        ",
    )
    .bind(line.content.name)
    .bind(line.content.number)
    .bind(line.content.color_hex)
    .bind(RowLineStatus::from_line_status(line.content.status))
    .bind(line.content.description)
    .bind(line.content.start_station)
    .bind(line.content.end_station)
    .bind(line.id.raw())
    .fetch_one(executor)
    .await
    .map(|row: LineRow| with_id(row))
    .map_err(convert_error)
}

pub async fn delete<'c, E>(executor: E, id: Id<Line>) -> Result<bool>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query("DELETE FROM lineas WHERE id = ?1;")
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
    sqlx::query("DELETE FROM lineas;")
        .execute(executor)
        .await
        .map(|result| result.rows_affected())
        .map_err(convert_error)
}

pub async fn count<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM lineas;")
        .fetch_one(executor)
        .await
        .map(|count: i64| count.max(0) as u64)
        .map_err(convert_error)
}

pub async fn exists<'c, E>(executor: E, id: Id<Line>) -> Result<bool>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM lineas WHERE id = ?1);")
        .bind(id.raw())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

// Line Repo

pub async fn get_by_number<'c, E>(executor: E, number: u32) -> Result<Option<WithId<Line>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as(
        "
        SELECT id, name, number, color_hex, status, description, start_station, end_station
        FROM lineas
        WHERE number = ?1
        ORDER BY id ASC
        LIMIT 1;
        ",
    )
    .bind(number)
    .fetch_optional(executor)
    .await
    .map(|row: Option<LineRow>| row.map(with_id))
    .map_err(convert_error)
}

pub async fn get_by_name<'c, E, S>(executor: E, name: S) -> Result<Option<WithId<Line>>>
where
    E: Executor<'c, Database = Sqlite>,
    S: Into<String> + Send,
{
    sqlx::query_as(
        "
        SELECT id, name, number, color_hex, status, description, start_station, end_station
        FROM lineas
        WHERE name = ?1
        ORDER BY id ASC
        LIMIT 1;
        ",
    )
    .bind(name.into())
    .fetch_optional(executor)
    .await
    .map(|row: Option<LineRow>| row.map(with_id))
    .map_err(convert_error)
}
