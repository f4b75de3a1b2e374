use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Author, NewStory, Story, StoryFilter, StoryView};
use crate::services::StoryStore;

/// Story store backed by the `authors` and `stories` tables
#[derive(Clone)]
pub struct PgStoryStore {
    pool: PgPool,
}

impl PgStoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_story(row: &PgRow) -> Result<Story> {
        Ok(Story {
            id: row.try_get("id")?,
            author_id: row.try_get("author_id")?,
            headline: row.try_get("headline")?,
            category: stored_code(row.try_get("category")?)?,
            region: stored_code(row.try_get("region")?)?,
            details: row.try_get("details")?,
            date: row.try_get("date")?,
        })
    }
}

/// Decode an enum column; the CHECK constraints make failure a data error
fn stored_code<T: FromStr<Err = AppError>>(code: String) -> Result<T> {
    code.parse()
        .map_err(|_| AppError::Internal(format!("Unexpected stored code '{}'", code)))
}

#[async_trait]
impl StoryStore for PgStoryStore {
    async fn create_story(&self, author_id: i64, story: NewStory) -> Result<Story> {
        let row = sqlx::query(
            r#"
            INSERT INTO stories (author_id, headline, category, region, details, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, author_id, headline, category, region, details, date
            "#,
        )
        .bind(author_id)
        .bind(&story.headline)
        .bind(story.category.as_str())
        .bind(story.region.as_str())
        .bind(&story.details)
        .bind(Utc::now().date_naive())
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_story(&row)
    }

    async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<StoryView>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.author_id, s.headline, s.category, s.region, s.details, s.date,
                   a.name AS author_name
            FROM stories s
            JOIN authors a ON a.id = s.author_id
            WHERE ($1::text IS NULL OR s.category = $1)
              AND ($2::text IS NULL OR s.region = $2)
              AND ($3::date IS NULL OR s.date >= $3)
            ORDER BY s.id ASC
            "#,
        )
        .bind(filter.category.map(|c| c.as_str()))
        .bind(filter.region.map(|r| r.as_str()))
        .bind(filter.since)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<StoryView> {
                let author: String = row.try_get("author_name")?;
                Ok(StoryView::new(Self::row_to_story(row)?, author))
            })
            .collect()
    }

    async fn find_author_by_user(&self, user_id: Uuid) -> Result<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, user_id, name FROM authors WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    async fn find_story(&self, story_id: i64) -> Result<Option<Story>> {
        let row = sqlx::query(
            r#"
            SELECT id, author_id, headline, category, region, details, date
            FROM stories
            WHERE id = $1
            "#,
        )
        .bind(story_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_story).transpose()
    }

    async fn delete_story(&self, story_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(story_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
