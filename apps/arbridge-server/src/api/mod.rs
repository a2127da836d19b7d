//! Boundary API layers.

pub mod rest;
