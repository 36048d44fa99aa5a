//! Step-Up (Second-Factor) Authentication Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, store/action/principal traits
//! - `application/` - Use cases
//! - `infra/` - Store implementations
//!
//! ## Security Model
//! - A sensitive operation proceeds only after the step-up protocol returns
//!   an outcome; until then the caller holds a nonce-bearing signal
//! - Nonces are 32 OS-random bytes; comparison is constant-time
//! - A challenge is single-use: completion deletes it before the gated
//!   operation runs
//! - Completion failures are undifferentiated; the caller cannot tell
//!   which validation step rejected the attempt
//! - Challenges expire via store TTL (5 minutes by default); expired
//!   entries behave as absent
//!
//! ## Known gap
//! The completion sequence is read-validate-delete without compare-and-swap:
//! two concurrent completions with the same valid nonce can both pass
//! validation before either deletes the entry. Deployments needing stronger
//! guarantees should make the store's `delete` fenced (atomic get-and-delete)
//! or serialize per-session access.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::StepUpConfig;
pub use application::run_protocol::{ChallengeManager, RequestInfo, RunParams};
pub use domain::action::{ActionFactory, ActionSetup, SensitiveAction};
pub use domain::entities::Challenge;
pub use domain::principal::Principal;
pub use domain::repository::ChallengeStore;
pub use domain::value_objects::{
    AllowedMethods, AuthOutcome, CallbackParams, FactorMethod, Nonce,
};
pub use error::{StepUpError, StepUpResult};
pub use infra::memory::MemoryChallengeStore;
pub use infra::postgres::PgChallengeStore;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
