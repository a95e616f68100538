#![forbid(unsafe_code)]

//! Cooperative single-threaded task orchestration.
//!
//! Two delayed operations (toasting bread, frying bacon) are started
//! concurrently on one thread, joined into a sandwich, and reported from a
//! background task started by a synchronous trigger that returns at once.

pub mod config;
pub mod display;
pub mod errors;
pub mod event_loop;
pub mod kitchen;
pub mod models;
pub mod orchestrator;

pub use config::KitchenConfig;
pub use errors::{AppError, Result};
