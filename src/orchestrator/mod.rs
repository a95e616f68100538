//! Orchestration of orders on top of the kitchen.
//!
//! Covers the synchronous trigger handler, the background result reporter,
//! supervision of fire-and-forget tasks, and the dedicated worker used when a
//! caller genuinely has to block for a result.

pub mod handler;
pub mod reporter;
pub mod supervisor;
pub mod worker;
