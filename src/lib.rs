//! Password generator and local credential keeper.
//!
//! Generates passwords with guaranteed character classes and keeps
//! per-service credential digests in a JSON file gated by one master password.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Generator, credential store, strength scoring, audit trail
//! - `models` — Store file and config data structures

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;

pub use crate::core::generator::{CharacterSets, Generator, GeneratorOptions};
pub use crate::core::store::CredentialStore;
pub use crate::error::{Error, PersistenceError, Result};
pub use crate::models::credential::ServiceRecord;
