use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::instrument;

use super::schema::{self, NewsletterResponse};
use crate::{
    app::{
        error::{AppError, AppResult},
        AppState,
    },
    domain::newsletter::{NewNewsletter, NewsletterUpdate},
};

#[derive(sqlx::FromRow)]
struct NewsletterRecord {
    id: i64,
    title: String,
    body: String,
    published_at: DateTime<Utc>,
    edited_at: DateTime<Utc>,
}

impl From<NewsletterRecord> for NewsletterResponse {
    fn from(record: NewsletterRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            body: record.body,
            published_at: record.published_at,
            edited_at: record.edited_at,
        }
    }
}

#[instrument(name = "listing all newsletters", skip(state))]
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<NewsletterResponse>>> {
    let records = list_newsletters(&state.db)
        .await
        .context("Failed to load newsletters from the database.")?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[instrument(name = "creating a newsletter", skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Form(body): Form<schema::CreateNewsletterBody>,
) -> AppResult<(StatusCode, Json<NewsletterResponse>)> {
    let new_newsletter = NewNewsletter::try_from(body).map_err(AppError::ValidationError)?;

    let record = insert_newsletter(&state.db, new_newsletter)
        .await
        .context("Failed to save the new newsletter.")?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

#[instrument(name = "fetching a newsletter", skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<NewsletterResponse>> {
    let record = fetch_newsletter(&state.db, id)
        .await
        .context("Failed to load the newsletter from the database.")?
        .ok_or(AppError::NotFound)?;

    Ok(Json(record.into()))
}

/// Partial update: only the submitted fields are overwritten, everything else
/// on the row is left untouched. `edited_at` is refreshed on every mutation.
#[instrument(name = "updating a newsletter", skip(state, fields))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(fields): Form<schema::UpdateNewsletterBody>,
) -> AppResult<Json<NewsletterResponse>> {
    let update = NewsletterUpdate::try_from(fields).map_err(AppError::ValidationError)?;

    let mut transaction = state
        .db
        .begin()
        .await
        .context("Failed to begin a database transaction.")?;

    let mut record = fetch_newsletter_for_update(&mut transaction, id)
        .await
        .context("Failed to load the newsletter from the database.")?
        .ok_or(AppError::NotFound)?;

    if let Some(title) = update.title {
        record.title = title.as_ref().to_owned();
    }
    if let Some(body) = update.body {
        record.body = body.as_ref().to_owned();
    }
    record.edited_at = Utc::now();

    update_newsletter(&mut transaction, &record)
        .await
        .context("Failed to save the updated newsletter.")?;

    transaction
        .commit()
        .await
        .context("Failed to commit the database transaction.")?;

    Ok(Json(record.into()))
}

/// Removal is permanent. A second delete of the same id reports not-found
/// instead of silently succeeding.
#[instrument(name = "deleting a newsletter", skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<schema::DeleteConfirmation>> {
    let deleted = delete_newsletter(&state.db, id)
        .await
        .context("Failed to delete the newsletter from the database.")?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(schema::DeleteConfirmation {
        message: "record successfully deleted".to_owned(),
    }))
}

#[instrument(name = "loading all newsletter rows", skip(db))]
async fn list_newsletters(db: &SqlitePool) -> Result<Vec<NewsletterRecord>, sqlx::Error> {
    sqlx::query_as::<_, NewsletterRecord>(
        "SELECT id, title, body, published_at, edited_at FROM newsletters ORDER BY id",
    )
    .fetch_all(db)
    .await
}

#[instrument(name = "inserting a newsletter into the database", skip(db, newsletter), fields(title = %newsletter.title))]
async fn insert_newsletter(
    db: &SqlitePool,
    newsletter: NewNewsletter,
) -> Result<NewsletterRecord, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, NewsletterRecord>(
        "INSERT INTO newsletters (title, body, published_at, edited_at) \
         VALUES (?1, ?2, ?3, ?4) \
         RETURNING id, title, body, published_at, edited_at",
    )
    .bind(newsletter.title.as_ref())
    .bind(newsletter.body.as_ref())
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
    .map_err(|e| {
        tracing::error!(detail = e.to_string(), "failed to save new newsletter");
        e
    })
}

#[instrument(name = "loading a newsletter row by id", skip(db))]
async fn fetch_newsletter(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<NewsletterRecord>, sqlx::Error> {
    sqlx::query_as::<_, NewsletterRecord>(
        "SELECT id, title, body, published_at, edited_at FROM newsletters WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

#[instrument(name = "loading a newsletter row for update", skip(transaction))]
async fn fetch_newsletter_for_update(
    transaction: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> Result<Option<NewsletterRecord>, sqlx::Error> {
    sqlx::query_as::<_, NewsletterRecord>(
        "SELECT id, title, body, published_at, edited_at FROM newsletters WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut **transaction)
    .await
}

#[instrument(name = "writing a newsletter row back", skip(transaction, record), fields(id = record.id))]
async fn update_newsletter(
    transaction: &mut Transaction<'_, Sqlite>,
    record: &NewsletterRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE newsletters SET title = ?1, body = ?2, edited_at = ?3 WHERE id = ?4")
        .bind(&record.title)
        .bind(&record.body)
        .bind(record.edited_at)
        .bind(record.id)
        .execute(&mut **transaction)
        .await
        .map_err(|e| {
            tracing::error!(detail = e.to_string(), "failed to save updated newsletter");
            e
        })?;

    Ok(())
}

#[instrument(name = "deleting a newsletter row", skip(db))]
async fn delete_newsletter(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM newsletters WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
