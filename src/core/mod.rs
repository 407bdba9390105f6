//! Core logic: generation, storage, scoring, and the audit trail.

pub mod audit_log;
pub mod config;
pub mod digest;
pub mod file_lock;
pub mod generator;
pub mod paths;
pub mod store;
pub mod store_file;
pub mod strength;
