//! Store Traits
//!
//! Interface for challenge persistence. Implementations are in the
//! infrastructure layer.

use crate::error::StepUpResult;
use serde_json::Value;
use std::time::Duration;

/// Session-scoped key/value store holding the pending challenge
///
/// One fixed key per session; values are schema-agnostic JSON. The store
/// owns expiry: entries past their TTL must behave as absent. `set` over
/// an existing key is last-write-wins - the protocol relies on silent
/// replacement of a prior pending challenge.
///
/// No compare-and-swap is required across `get`/`delete`; see the crate
/// docs for the concurrency gap this leaves open.
#[trait_variant::make(ChallengeStore: Send)]
pub trait LocalChallengeStore {
    /// Write `value` under `key` with the given TTL, replacing any entry
    async fn set(&self, key: &str, value: Value, ttl: Duration) -> StepUpResult<()>;

    /// Read the live (non-expired) value under `key`
    async fn get(&self, key: &str) -> StepUpResult<Option<Value>>;

    /// Remove the entry under `key`; absent keys are a no-op
    async fn delete(&self, key: &str) -> StepUpResult<()>;
}
