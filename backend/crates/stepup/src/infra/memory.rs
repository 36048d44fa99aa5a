//! In-Memory Store Implementation
//!
//! Hashmap-backed store for tests and development wiring. Expiry is
//! enforced on read, matching the "expired behaves as absent" contract.

use crate::domain::repository::ChallengeStore;
use crate::error::StepUpResult;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

struct Entry {
    value: Value,
    expires_at_ms: i64,
}

/// In-memory challenge store
#[derive(Default)]
pub struct MemoryChallengeStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChallengeStore for MemoryChallengeStore {
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> StepUpResult<()> {
        let expires_at_ms = Utc::now().timestamp_millis() + ttl.as_millis() as i64;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), Entry { value, expires_at_ms });
        Ok(())
    }

    async fn get(&self, key: &str) -> StepUpResult<Option<Value>> {
        let now_ms = Utc::now().timestamp_millis();
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.expires_at_ms > now_ms => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> StepUpResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
