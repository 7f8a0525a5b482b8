//! Authentication primitives.
//!
//! Sessions are issued by the external identity provider. This service only
//! verifies the HS256 access tokens it signs (see [`jwt`]).

pub mod jwt;
