//! # BookVault Shared Library
//!
//! This crate contains the authentication/authorization core, the directory
//! traits it consumes, and the database models shared by the BookVault API
//! server.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, token issuance/validation, credential
//!   validation, ownership checks, root-admin bootstrap
//! - `directory`: the `UserDirectory` and `ResourceStore` traits the auth
//!   core is written against, plus an in-memory implementation for tests
//! - `models`: database models and CRUD operations
//! - `db`: connection pool and migration helpers

pub mod auth;
pub mod db;
pub mod directory;
pub mod models;

/// Current version of the BookVault shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
