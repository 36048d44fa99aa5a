//! Run Protocol Use Case
//!
//! The step-up decision and challenge lifecycle, invoked once per inbound
//! request attempting a sensitive operation.

use std::sync::Arc;

use http::Method;

use crate::application::config::StepUpConfig;
use crate::domain::action::{ActionFactory, SensitiveAction};
use crate::domain::entities::Challenge;
use crate::domain::principal::Principal;
use crate::domain::repository::ChallengeStore;
use crate::domain::value_objects::{AllowedMethods, AuthOutcome, CallbackParams, Nonce};
use crate::error::{StepUpError, StepUpResult};

/// Method and path of the inbound request, preserved for re-entry
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub path: String,
}

impl RequestInfo {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// Caller-supplied parameters for one `run` invocation
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    /// Nonce completing a pending challenge, when this is the re-entry call
    pub second_factor_nonce: Option<String>,
    /// Remaining request parameters, forwarded to the action factory
    pub extra: CallbackParams,
}

impl RunParams {
    pub fn with_nonce(nonce: impl Into<String>) -> Self {
        Self {
            second_factor_nonce: Some(nonce.into()),
            extra: CallbackParams::new(),
        }
    }
}

/// Challenge Manager - orchestrates the step-up protocol
///
/// Bound to one principal, one authorization context (guardian), and one
/// action-descriptor factory. Holds the allowed-factor policy for this
/// invocation; `run` drives the three-branch state machine.
pub struct ChallengeManager<P, G, F>
where
    P: Principal,
    F: ActionFactory<P, G>,
{
    principal: P,
    guardian: G,
    factory: F,
    allowed_methods: AllowedMethods,
    config: Arc<StepUpConfig>,
}

impl<P, G, F> ChallengeManager<P, G, F>
where
    P: Principal,
    F: ActionFactory<P, G>,
{
    pub fn new(principal: P, guardian: G, factory: F) -> Self {
        Self::with_config(principal, guardian, factory, Arc::new(StepUpConfig::default()))
    }

    pub fn with_config(principal: P, guardian: G, factory: F, config: Arc<StepUpConfig>) -> Self {
        Self {
            principal,
            guardian,
            factory,
            allowed_methods: AllowedMethods::default(),
            config,
        }
    }

    /// Also accept backup codes for this invocation (idempotent)
    pub fn allow_backup_codes(&mut self) {
        self.allowed_methods = self.allowed_methods.with_backup_codes();
    }

    pub fn allowed_methods(&self) -> &AllowedMethods {
        &self.allowed_methods
    }

    /// Run the step-up protocol for one inbound request
    ///
    /// Returns an [`AuthOutcome`] when no further factor is needed, or
    /// raises [`StepUpError::StepUpRequired`] carrying the nonce of a
    /// freshly persisted challenge. [`StepUpError::InvalidAccess`] means
    /// a completion attempt failed validation.
    pub async fn run<S>(
        &self,
        request: &RequestInfo,
        params: &RunParams,
        store: &S,
    ) -> StepUpResult<AuthOutcome>
    where
        S: ChallengeStore + Sync,
    {
        let enrolled = self.principal.enrolled_second_factors();
        if !self.allowed_methods.intersects(&enrolled) {
            let action = self
                .factory
                .build(&params.extra, &self.principal, &self.guardian);
            action.no_second_factors_enabled().await?;
            tracing::debug!("No usable second factor enrolled");
            return Ok(AuthOutcome::NoSecondFactor);
        }

        match params.second_factor_nonce.as_deref() {
            Some(nonce) if !nonce.is_empty() => {
                self.complete_challenge(&Nonce::from_string(nonce), store)
                    .await?;
                Ok(AuthOutcome::SecondFactorAuthSuccessful)
            }
            _ => {
                let nonce = self.create_challenge(request, params, store).await?;
                Err(StepUpError::StepUpRequired { nonce })
            }
        }
    }

    /// Persist a fresh challenge and return its nonce
    ///
    /// Replaces any pending challenge for the session (last-write-wins).
    async fn create_challenge<S>(
        &self,
        request: &RequestInfo,
        params: &RunParams,
        store: &S,
    ) -> StepUpResult<Nonce>
    where
        S: ChallengeStore + Sync,
    {
        let action = self
            .factory
            .build(&params.extra, &self.principal, &self.guardian);
        let setup = action.second_factor_auth_required().await?;

        let nonce = Nonce::generate(self.config.nonce_bytes_len);
        let challenge = Challenge::new(
            nonce.clone(),
            request.method.as_str().to_string(),
            request.path.clone(),
            setup.callback_params.unwrap_or_default(),
            setup
                .redirect_path
                .unwrap_or_else(|| self.config.default_redirect_path.clone()),
            self.allowed_methods.clone(),
        );

        let record = serde_json::to_value(&challenge)?;
        store
            .set(&self.config.session_key, record, self.config.challenge_ttl)
            .await?;

        tracing::info!(
            challenge_id = %challenge.id,
            callback_method = %challenge.callback_method,
            callback_path = %challenge.callback_path,
            "Step-up challenge issued"
        );

        Ok(nonce)
    }

    /// Validate and consume the pending challenge
    ///
    /// Every rejection is the same undifferentiated `InvalidAccess`; the
    /// caller must not learn which validation step failed.
    async fn complete_challenge<S>(&self, supplied: &Nonce, store: &S) -> StepUpResult<()>
    where
        S: ChallengeStore + Sync,
    {
        let record = store
            .get(&self.config.session_key)
            .await?
            .ok_or(StepUpError::InvalidAccess)?;
        let challenge: Challenge = serde_json::from_value(record)?;

        if !challenge.matches_nonce(supplied) {
            tracing::warn!(
                challenge_id = %challenge.id,
                "Completion attempt with mismatched nonce"
            );
            return Err(StepUpError::InvalidAccess);
        }

        if !challenge.successful {
            tracing::warn!(
                challenge_id = %challenge.id,
                "Completion attempt before external verification"
            );
            return Err(StepUpError::InvalidAccess);
        }

        // Single-use: the record is gone before the gated operation runs
        store.delete(&self.config.session_key).await?;

        let action = self
            .factory
            .build(&challenge.callback_params, &self.principal, &self.guardian);
        action
            .second_factor_auth_successful(&challenge.callback_params)
            .await?;

        tracing::info!(challenge_id = %challenge.id, "Step-up challenge completed");
        Ok(())
    }
}
