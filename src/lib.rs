// src/lib.rs

//! OutLayers storefront backend: products, cart, transactional
//! checkout and order history, with customer/staff/admin roles.
//!
//! The binary in `main.rs` wires [`web`] routes over [`state::AppState`];
//! everything below the handlers talks to storage through
//! [`store::Store`], whose production implementation is Postgres.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod web;
