//! Collection of general utilities shared across modules.

pub mod jwt;
