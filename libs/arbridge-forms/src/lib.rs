//! Form backend capability for the integration gateway.
//!
//! Modules delegate their create/get/update/delete/search effects to a
//! [`FormHandler`], the abstract surface of the external ticketing system.
//! The gateway core never implements this capability itself; this crate
//! provides the contract plus [`InMemoryFormStore`], the consistent
//! reference backend used by the bundled modules and by tests.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod error;
pub mod handler;
pub mod memory;

pub use error::FormError;
pub use handler::{FieldMap, FormHandler};
pub use memory::InMemoryFormStore;
