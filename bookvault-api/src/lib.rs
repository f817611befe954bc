//! # BookVault API Server Library
//!
//! This library provides the HTTP surface of BookVault.
//!
//! ## Modules
//!
//! - `app`: application state, router builder, and the current-user extractor
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `response`: success response envelope
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod response;
pub mod routes;
