//! Test module for whole-engine behavior.
//!
//! - **Integration tests**: full nights driven through the [`Engine`](crate::engine::Engine)
//! - **Property tests**: randomized games checked against the engine's invariants
//! - **Helper functions**: table setup and night drivers
//!
//! # Test Structure
//!
//! - `integration.rs`: scripted scenarios
//! - `properties.rs`: `proptest` properties
//! - `helpers.rs`: setup utilities and factory functions

mod helpers;
mod integration;

pub use helpers::*;
