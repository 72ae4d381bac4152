// src/services/mod.rs

//! Cross-cutting services: password handling and server-side sessions.

pub mod auth_service;
pub mod session_service;

pub use session_service::{Session, Sessions};
