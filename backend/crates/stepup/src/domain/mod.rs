//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Challenge)
//! - Domain value objects (FactorMethod, AllowedMethods, Nonce, AuthOutcome)
//! - Store trait (interface)
//! - Action and principal seams (interfaces)

pub mod action;
pub mod entities;
pub mod principal;
pub mod repository;
pub mod value_objects;
