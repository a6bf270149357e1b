//! Shared HTTP plumbing for the API endpoints.
//!
//! Authentication routes live in `auth`; this module holds the response
//! helpers and the body extractor they share.

pub mod common;
pub mod extract;
