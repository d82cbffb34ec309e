//! Storefront API Core - Wire types library.
//!
//! This crate provides the JSON contracts served by the storefront API:
//! - product listings and product detail
//! - carts and checkout hand-off
//! - money, images, SEO metadata and pagination
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Upstream
//! values are carried through verbatim: money amounts stay decimal strings and
//! pagination cursors stay opaque.
//!
//! # Modules
//!
//! - [`types`] - DTOs returned by the API routes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
