//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes/tokens, Base64, constant-time compare)

pub mod crypto;
