//! Arbridge gateway server library: configuration, wiring and the REST
//! boundary. The binary in `main.rs` is a thin CLI over these pieces.

pub mod api;
pub mod bootstrap;
pub mod config;
