//! Tidewear Storefront library.
//!
//! The storefront's logic as a library, usable from any front end:
//!
//! - [`browse`] - filter and sort the catalog
//! - [`cart`] - add, update and remove cart lines
//! - [`pricing`] - merchandise, shipping, tax and total
//! - [`catalog`] - catalog loading, caching and product lookups
//! - [`session`] - the shopper session tying it all together
//!
//! # Architecture
//!
//! The engines are pure functions over explicit inputs. All state lives in
//! a [`session::ShopSession`], which persists the cart to a
//! [`store::KeyValueStore`] after every change.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod pricing;
pub mod session;
pub mod store;

pub use error::{Result, StorefrontError};
pub use session::ShopSession;
