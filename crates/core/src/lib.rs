//! Tidewear Core - Shared domain types.
//!
//! This crate provides the types used across all Tidewear components:
//! - `storefront` - Browse, cart and pricing engines plus the shopper session
//! - `cli` - Command-line front end for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and their invariants - no I/O and no
//! persistence. This keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, quantities, products,
//!   cart lines and shopper options

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
