//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Bearer token validation (JWT, mock)
//! - `http` - axum routes, handlers and middleware
//! - `memory` - In-memory record stores, course directory and view log
//! - `postgres` - PostgreSQL record stores, course directory and view log
//! - `storage` - Uploaded object storage (local directory, in-memory)

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
