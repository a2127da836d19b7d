//! Work-order handler for the integration gateway.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod module;

pub use module::WorkOrderModule;
