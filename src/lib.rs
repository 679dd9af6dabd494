//! Session Content - content resolution, access control, delivery and
//! view tracking for course sessions.
//!
//! A session's content is drawn from two record stores (uploaded resources
//! and lightweight links). Requests are authorized against the viewer's role
//! and enrollment, resolved into a byte stream, redirect or link card, and
//! counted once per viewer in an append-only view log.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
