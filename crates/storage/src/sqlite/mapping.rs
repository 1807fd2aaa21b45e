use std::str::FromStr;

use chrono::{DateTime, Utc};
use prep_core::model::{
    Category, CategoryIcon, ProgressStatus, Question, QuestionDraft, UserProgress,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn parse_id<T>(field: &'static str, raw: &str) -> Result<T, StorageError>
where
    T: FromStr,
{
    raw.parse::<T>()
        .map_err(|_| StorageError::Serialization(format!("invalid {field}: {raw}")))
}

/// Unique-constraint violations become `Conflict`; everything else is a connection error.
pub(crate) fn write_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        _ => StorageError::Connection(e.to_string()),
    }
}

pub(crate) fn map_category_row(row: &SqliteRow) -> Result<Category, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let icon = row
        .try_get::<Option<String>, _>("icon")
        .map_err(ser)?
        .map_or_else(CategoryIcon::default, |key| CategoryIcon::from_key(&key));

    let category = Category::new(
        parse_id("category id", &id)?,
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<Option<String>, _>("description")
            .map_err(ser)?
            .unwrap_or_default(),
        icon,
    )
    .map_err(prep_core::Error::from)?;
    Ok(category)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let category_id: String = row.try_get("category_id").map_err(ser)?;

    let question = QuestionDraft {
        id: parse_id("question id", &id)?,
        category_id: parse_id("category id", &category_id)?,
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        difficulty: row.try_get("difficulty").map_err(ser)?,
        tips: row.try_get("tips").map_err(ser)?,
        example_answer: row.try_get("example_answer").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    }
    .validate()
    .map_err(prep_core::Error::from)?;
    Ok(question)
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<UserProgress, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    let question_id: String = row.try_get("question_id").map_err(ser)?;
    let status: String = row.try_get("status").map_err(ser)?;
    let completed_at: Option<DateTime<Utc>> = row.try_get("completed_at").map_err(ser)?;

    let progress = UserProgress::from_persisted(
        parse_id("progress id", &id)?,
        parse_id("user id", &user_id)?,
        parse_id("question id", &question_id)?,
        ProgressStatus::parse(&status).map_err(prep_core::Error::from)?,
        row.try_get::<Option<String>, _>("notes")
            .map_err(ser)?
            .unwrap_or_default(),
        completed_at,
    )
    .map_err(prep_core::Error::from)?;
    Ok(progress)
}
