//! SQLite implementation of the `OverrideRepository`.
//!
//! Override history is append-only with a single current pointer per
//! `(agent_name, prompt_type)`. The deactivate-then-insert sequence in
//! `save` runs inside one transaction so concurrent saves for the same key
//! cannot leave two rows active; a partial unique index in the schema backs
//! the same invariant.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::models::{OverrideDraft, PromptOverride, PromptType};
use crate::domain::ports::errors::PersistenceError;
use crate::domain::ports::OverrideRepository;

/// SQLite-backed persistence for versioned prompt overrides.
#[derive(Clone)]
pub struct SqliteOverrideRepository {
    pool: SqlitePool,
}

impl SqliteOverrideRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// SQLite row mapping for the `prompt_overrides` table.
#[derive(sqlx::FromRow)]
struct PromptOverrideRow {
    id: i64,
    agent_name: String,
    prompt_type: String,
    original_prompt: Option<String>,
    improved_prompt: String,
    change_reason: String,
    confidence_score: f64,
    is_active: bool,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PromptOverrideRow> for PromptOverride {
    type Error = PersistenceError;

    fn try_from(row: PromptOverrideRow) -> Result<Self, Self::Error> {
        let prompt_type = PromptType::from_str(&row.prompt_type)
            .ok_or_else(|| PersistenceError::UnknownPromptType(row.prompt_type.clone()))?;
        let created_at = parse_datetime(&row.created_at)?;
        let updated_at = parse_datetime(&row.updated_at)?;

        Ok(PromptOverride {
            id: row.id,
            agent_name: row.agent_name,
            prompt_type,
            original_prompt: row.original_prompt,
            improved_prompt: row.improved_prompt,
            change_reason: row.change_reason,
            confidence_score: row.confidence_score,
            is_active: row.is_active,
            created_at,
            updated_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, PersistenceError> {
    Ok(chrono::DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

#[async_trait]
impl OverrideRepository for SqliteOverrideRepository {
    async fn save(&self, draft: &OverrideDraft) -> Result<i64, PersistenceError> {
        draft.validate()?;

        let now = Utc::now().to_rfc3339();

        // Deactivate + insert must be atomic per key, or two rows could end
        // up active under concurrent saves.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE prompt_overrides SET is_active = 0, updated_at = ? \
             WHERE agent_name = ? AND prompt_type = ? AND is_active = 1",
        )
        .bind(&now)
        .bind(&draft.agent_name)
        .bind(draft.prompt_type.as_str())
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"INSERT INTO prompt_overrides
               (agent_name, prompt_type, original_prompt, improved_prompt,
                change_reason, confidence_score, is_active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)"#,
        )
        .bind(&draft.agent_name)
        .bind(draft.prompt_type.as_str())
        .bind(&draft.original_prompt)
        .bind(&draft.improved_prompt)
        .bind(&draft.change_reason)
        .bind(draft.confidence_score)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_active(
        &self,
        agent_name: &str,
    ) -> Result<Option<PromptOverride>, PersistenceError> {
        let row: Option<PromptOverrideRow> = sqlx::query_as(
            "SELECT * FROM prompt_overrides \
             WHERE agent_name = ? AND prompt_type = ? AND is_active = 1 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(agent_name)
        .bind(PromptType::System.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PromptOverride::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<PromptOverride>, PersistenceError> {
        let rows: Vec<PromptOverrideRow> =
            sqlx::query_as("SELECT * FROM prompt_overrides ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(PromptOverride::try_from).collect()
    }

    async fn remove(&self, agent_name: &str) -> Result<bool, PersistenceError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE prompt_overrides SET is_active = 0, updated_at = ? \
             WHERE agent_name = ? AND prompt_type = ? AND is_active = 1",
        )
        .bind(&now)
        .bind(agent_name)
        .bind(PromptType::System.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn latest_created_at(
        &self,
        agent_name: &str,
    ) -> Result<Option<DateTime<Utc>>, PersistenceError> {
        let row: Option<(Option<String>,)> = sqlx::query_as(
            "SELECT MAX(created_at) FROM prompt_overrides \
             WHERE agent_name = ? AND prompt_type = ?",
        )
        .bind(agent_name)
        .bind(PromptType::System.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row.and_then(|(ts,)| ts) {
            Some(ts) => Ok(Some(parse_datetime(&ts)?)),
            None => Ok(None),
        }
    }
}
