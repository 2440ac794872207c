//! API route modules
//!
//! # Structure
//!
//! - [`auth`] - token validation
//! - [`tables`] - cached table list/detail, build-message, POS actions
//! - [`products`] - product reload delegation
//! - [`frontend`] - monitor endpoints exposing wire traces and cache admin

pub mod auth;
pub mod frontend;
pub mod products;
pub mod tables;
