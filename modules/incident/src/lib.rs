//! Incident handler for the integration gateway.
//!
//! Translates canonical incident fields to the `HPD:Help Desk` form layout
//! and back, and delegates the actual effects to a
//! [`arbridge_forms::FormHandler`].

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod module;

pub use module::IncidentModule;
