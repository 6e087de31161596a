//! Identity primitives.
//!
//! - [`jwt`] -- access-token generation and validation. Sessions are issued
//!   elsewhere; this service only verifies the bearer token.

pub mod jwt;
