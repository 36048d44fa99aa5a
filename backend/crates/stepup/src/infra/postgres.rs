//! PostgreSQL Store Implementation

use crate::domain::repository::ChallengeStore;
use crate::error::StepUpResult;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use std::time::Duration;

/// PostgreSQL-backed challenge store
///
/// One row per session key; `set` is an upsert, so challenge creation is
/// last-write-wins across concurrent requests of the same session.
#[derive(Clone)]
pub struct PgChallengeStore {
    pool: PgPool,
}

impl PgChallengeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired challenge rows
    pub async fn cleanup_expired(&self) -> StepUpResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM stepup_challenges WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(challenges = deleted, "Cleaned up expired step-up challenges");

        Ok(deleted)
    }
}

impl ChallengeStore for PgChallengeStore {
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> StepUpResult<()> {
        let expires_at_ms = Utc::now().timestamp_millis() + ttl.as_millis() as i64;

        sqlx::query(
            r#"
            INSERT INTO stepup_challenges (session_key, challenge, expires_at_ms)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_key)
            DO UPDATE SET
                challenge = EXCLUDED.challenge,
                expires_at_ms = EXCLUDED.expires_at_ms
            "#,
        )
        .bind(key)
        .bind(&value)
        .bind(expires_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> StepUpResult<Option<Value>> {
        let now_ms = Utc::now().timestamp_millis();

        let value = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT challenge
            FROM stepup_challenges
            WHERE session_key = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(key)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn delete(&self, key: &str) -> StepUpResult<()> {
        sqlx::query("DELETE FROM stepup_challenges WHERE session_key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
