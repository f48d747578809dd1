//! Core types and trait definitions for the statefacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod funfact;
pub mod merge;
pub mod reference;
pub mod store;

pub use error::{Error, Result};
