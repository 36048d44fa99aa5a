//! Sensitive Action Seam
//!
//! Each gated operation implements these capabilities; the manager
//! depends only on the traits, never on concrete operation types.

use crate::domain::value_objects::CallbackParams;
use crate::error::StepUpResult;

/// Operation-specific configuration for a challenge about to be created
///
/// Both fields are optional; an absent redirect falls back to the
/// configured default.
#[derive(Debug, Clone, Default)]
pub struct ActionSetup {
    /// Where to send the user once the step-up completes
    pub redirect_path: Option<String>,
    /// Serializable metadata that must survive until completion
    pub callback_params: Option<CallbackParams>,
}

/// Capabilities of one sensitive operation, invoked per protocol phase
#[trait_variant::make(SensitiveAction: Send)]
pub trait LocalSensitiveAction {
    /// The principal has no usable factor; the operation decides what
    /// that means (e.g. record an audit note, or simply permit it).
    async fn no_second_factors_enabled(&self) -> StepUpResult<()>;

    /// A challenge is about to be created; return the metadata to carry
    /// across the out-of-band verification.
    async fn second_factor_auth_required(&self) -> StepUpResult<ActionSetup>;

    /// The challenge completed; the gated operation executes here.
    /// Invoked at most once per consumed challenge.
    async fn second_factor_auth_successful(
        &self,
        callback_params: &CallbackParams,
    ) -> StepUpResult<()>;
}

/// Builds an action descriptor from request or stored callback parameters
pub trait ActionFactory<P, G> {
    type Action: SensitiveAction;

    fn build(&self, params: &CallbackParams, principal: &P, guardian: &G) -> Self::Action;
}
