//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token validation (and minting, for tooling and tests).

pub mod jwt;
