//! Data structures for the store file and configuration.

pub mod config;
pub mod credential;
pub mod policy;
