//! Authentication module for account creation, login and token handling.
//!
//! This module provides the public interface for user authentication-related
//! functionality: password hashing, the signup/login/refresh service, the
//! bearer-token middleware and the HTTP routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;
pub mod service;
