//! Principal Seam
//!
//! Enrollment state lives outside this crate; the protocol only ever
//! asks one question of an identity.

use crate::domain::value_objects::FactorMethod;

/// The authenticated identity attempting a sensitive operation
pub trait Principal {
    /// Second-factor methods this principal has enrolled and verified
    fn enrolled_second_factors(&self) -> Vec<FactorMethod>;
}
