//! Application Configuration
//!
//! Configuration for the step-up application layer.

use std::time::Duration;

/// Step-up application configuration
#[derive(Debug, Clone)]
pub struct StepUpConfig {
    /// Fixed per-session store key holding the pending challenge
    pub session_key: String,
    /// Challenge TTL
    pub challenge_ttl: Duration,
    /// Nonce length in random bytes (encoded as base64url)
    pub nonce_bytes_len: usize,
    /// Redirect target used when the action supplies none
    pub default_redirect_path: String,
}

impl Default for StepUpConfig {
    fn default() -> Self {
        Self {
            session_key: "second_factor_challenge".to_string(),
            challenge_ttl: Duration::from_secs(300),
            nonce_bytes_len: 32,
            default_redirect_path: "/".to_string(),
        }
    }
}

impl StepUpConfig {
    pub fn challenge_ttl_ms(&self) -> i64 {
        self.challenge_ttl.as_millis() as i64
    }
}
