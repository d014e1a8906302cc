//! ttv library crate.
//!
//! This module exposes the internal components for integration testing.

pub mod cli;
pub mod config;
pub mod frame;
pub mod pacer;
pub mod player;
pub mod quantize;
pub mod render;
pub mod sampler;
pub mod source;
pub mod terminal;
