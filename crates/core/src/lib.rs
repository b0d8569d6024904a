//! Shopwindow Core - Shared types library.
//!
//! This crate provides common types used across all Shopwindow components:
//! - `catalog` - Local-mirror product catalog engine
//! - `cli` - Command-line catalog browser
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records, type-safe IDs, and field-wise patches

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
