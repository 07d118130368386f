//! Shared types, adapter traits, and core utilities for prefstore.
//!
//! This crate contains the foundational types that are shared between the
//! registry crate and all storage adapter implementations. Keeping them in a
//! separate crate lets adapters depend on the contract without pulling in the
//! registry itself.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod error;
pub mod prelude;
pub mod storage_adapter;
pub mod types;

// vim: ts=4
