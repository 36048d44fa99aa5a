//! Domain Entities
//!
//! Core business entities for the step-up domain.

use chrono::{DateTime, Utc};
use kernel::id::ChallengeId;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AllowedMethods, CallbackParams, Nonce};

/// Challenge entity - the persisted unit of step-up protocol state
///
/// Written to the challenge store under one fixed per-session key when a
/// step-up is first required; marked `successful` only by the external
/// verifier; read and deleted by the manager on the completing call.
/// At most one challenge is outstanding per session - writing a new one
/// replaces any pending predecessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    /// Correlation ID for logs; plays no part in protocol decisions
    pub id: ChallengeId,
    /// The only valid key to complete this challenge
    pub nonce: Nonce,
    /// HTTP method of the original request, for re-entry
    pub callback_method: String,
    /// Path of the original request, for re-entry
    pub callback_path: String,
    /// Opaque parameters the action chose to preserve until completion
    pub callback_params: CallbackParams,
    /// Where to send the user after completion
    pub redirect_path: String,
    /// Snapshot of the methods accepted when the challenge was issued
    pub allowed_methods: AllowedMethods,
    /// Set by the external verifier once the factor check passes
    pub successful: bool,
    pub created_at: DateTime<Utc>,
}

impl Challenge {
    /// Create a new pending challenge
    pub fn new(
        nonce: Nonce,
        callback_method: String,
        callback_path: String,
        callback_params: CallbackParams,
        redirect_path: String,
        allowed_methods: AllowedMethods,
    ) -> Self {
        Self {
            id: ChallengeId::new(),
            nonce,
            callback_method,
            callback_path,
            callback_params,
            redirect_path,
            allowed_methods,
            successful: false,
            created_at: Utc::now(),
        }
    }

    /// Constant-time check that a supplied nonce completes this challenge
    pub fn matches_nonce(&self, supplied: &Nonce) -> bool {
        self.nonce == *supplied
    }

    /// Approve the challenge. Only the external factor verifier calls this.
    pub fn mark_successful(&mut self) {
        self.successful = true;
    }
}
