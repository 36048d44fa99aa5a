//! Domain Value Objects
//!
//! Immutable value types for the step-up domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque parameter map attached to a challenge and replayed on completion
pub type CallbackParams = serde_json::Map<String, serde_json::Value>;

/// Second-factor method identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorMethod {
    Totp,
    SecurityKey,
    BackupCode,
}

impl FactorMethod {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use FactorMethod::*;
        match self {
            Totp => "totp",
            SecurityKey => "security_key",
            BackupCode => "backup_code",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use FactorMethod::*;
        match code {
            "totp" => Some(Totp),
            "security_key" => Some(SecurityKey),
            "backup_code" => Some(BackupCode),
            _ => None,
        }
    }
}

impl fmt::Display for FactorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Set of factor methods a manager accepts for one invocation
///
/// Copy-on-write: mutation produces a new set, the previous value is
/// never modified in place. A manager holding one of these can never
/// observe mutation from elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedMethods(Vec<FactorMethod>);

impl AllowedMethods {
    /// Build a set from the given methods, dropping duplicates
    pub fn new(methods: &[FactorMethod]) -> Self {
        let mut deduped = Vec::with_capacity(methods.len());
        for &m in methods {
            if !deduped.contains(&m) {
                deduped.push(m);
            }
        }
        Self(deduped)
    }

    #[inline]
    pub fn contains(&self, method: FactorMethod) -> bool {
        self.0.contains(&method)
    }

    /// Return a set that also accepts backup codes (idempotent)
    pub fn with_backup_codes(&self) -> Self {
        if self.contains(FactorMethod::BackupCode) {
            return self.clone();
        }
        let mut methods = self.0.clone();
        methods.push(FactorMethod::BackupCode);
        Self(methods)
    }

    /// Whether any enrolled method is accepted by this set
    pub fn intersects(&self, enrolled: &[FactorMethod]) -> bool {
        enrolled.iter().any(|m| self.contains(*m))
    }

    #[inline]
    pub fn as_slice(&self) -> &[FactorMethod] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self(vec![FactorMethod::Totp, FactorMethod::SecurityKey])
    }
}

/// Single-use random token linking a pending challenge to its completion
///
/// Equality is constant-time. The token value must never appear in logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nonce(String);

impl Nonce {
    /// Generate a fresh nonce from `byte_len` OS-random bytes
    pub fn generate(byte_len: usize) -> Self {
        Self(platform::crypto::random_token(byte_len))
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Nonce {
    fn eq(&self, other: &Self) -> bool {
        platform::crypto::constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl Eq for Nonce {}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal status of a completed `run` invocation
///
/// A closed sum type: anything outside these statuses cannot be
/// represented, and [`AuthOutcome::from_code`] rejects unknown codes at
/// construction rather than at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthOutcome {
    /// The principal has no usable second factor; the action was notified
    NoSecondFactor,
    /// A pending challenge was verified and consumed
    SecondFactorAuthSuccessful,
}

/// Construction-time failure for an unrecognized outcome status
#[derive(Debug, thiserror::Error)]
#[error("Unknown auth outcome status: {0}")]
pub struct UnknownStatus(pub String);

impl AuthOutcome {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use AuthOutcome::*;
        match self {
            NoSecondFactor => "no_second_factor",
            SecondFactorAuthSuccessful => "second_factor_auth_successful",
        }
    }

    /// Parse a stable status code, failing fast on anything unrecognized
    pub fn from_code(code: &str) -> Result<Self, UnknownStatus> {
        use AuthOutcome::*;
        match code {
            "no_second_factor" => Ok(NoSecondFactor),
            "second_factor_auth_successful" => Ok(SecondFactorAuthSuccessful),
            other => Err(UnknownStatus(other.to_string())),
        }
    }

    #[inline]
    pub const fn is_no_second_factor(&self) -> bool {
        matches!(self, AuthOutcome::NoSecondFactor)
    }

    #[inline]
    pub const fn is_second_factor_auth_successful(&self) -> bool {
        matches!(self, AuthOutcome::SecondFactorAuthSuccessful)
    }
}

impl TryFrom<&str> for AuthOutcome {
    type Error = UnknownStatus;

    fn try_from(code: &str) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_method_codes() {
        assert_eq!(FactorMethod::Totp.code(), "totp");
        assert_eq!(FactorMethod::SecurityKey.code(), "security_key");
        assert_eq!(FactorMethod::BackupCode.code(), "backup_code");

        assert_eq!(FactorMethod::from_code("totp"), Some(FactorMethod::Totp));
        assert_eq!(FactorMethod::from_code("webauthn"), None);
    }

    #[test]
    fn test_allowed_methods_default() {
        let allowed = AllowedMethods::default();
        assert!(allowed.contains(FactorMethod::Totp));
        assert!(allowed.contains(FactorMethod::SecurityKey));
        assert!(!allowed.contains(FactorMethod::BackupCode));
        assert_eq!(allowed.len(), 2);
    }

    #[test]
    fn test_with_backup_codes_copy_on_write() {
        let base = AllowedMethods::default();
        let extended = base.with_backup_codes();

        // The original set is untouched
        assert!(!base.contains(FactorMethod::BackupCode));
        assert!(extended.contains(FactorMethod::BackupCode));
        assert_eq!(extended.len(), 3);
    }

    #[test]
    fn test_with_backup_codes_idempotent() {
        let twice = AllowedMethods::default()
            .with_backup_codes()
            .with_backup_codes();
        assert_eq!(twice.len(), 3);
        assert_eq!(
            twice
                .as_slice()
                .iter()
                .filter(|&&m| m == FactorMethod::BackupCode)
                .count(),
            1
        );
    }

    #[test]
    fn test_allowed_methods_intersects() {
        let allowed = AllowedMethods::default();
        assert!(allowed.intersects(&[FactorMethod::Totp]));
        assert!(allowed.intersects(&[FactorMethod::BackupCode, FactorMethod::SecurityKey]));
        assert!(!allowed.intersects(&[FactorMethod::BackupCode]));
        assert!(!allowed.intersects(&[]));
    }

    #[test]
    fn test_allowed_methods_dedup() {
        let allowed = AllowedMethods::new(&[FactorMethod::Totp, FactorMethod::Totp]);
        assert_eq!(allowed.len(), 1);
    }

    #[test]
    fn test_nonce_generate() {
        let nonce = Nonce::generate(32);
        // 32 bytes -> 43 base64url chars
        assert_eq!(nonce.as_str().len(), 43);
        assert_ne!(nonce, Nonce::generate(32));
    }

    #[test]
    fn test_nonce_equality() {
        let a = Nonce::from_string("abc123");
        let b = Nonce::from_string("abc123");
        let c = Nonce::from_string("abc124");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
