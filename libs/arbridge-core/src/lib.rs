//! Arbridge core: the module dispatch and field-translation framework.
//!
//! The core is deliberately small. It owns:
//!
//! - the canonical data model ([`GenericRequest`], [`GenericResponse`],
//!   [`ValidationResult`]),
//! - the [`Module`] capability contract implemented per business-object type,
//! - the [`ModuleRegistry`] that holds handlers keyed by module type,
//! - the [`ModuleService`] dispatch orchestrator consumed by the boundary
//!   layer,
//! - field-translation helpers shared by all modules ([`mapping`]).
//!
//! Everything else — HTTP transport, the ticketing backend client, concrete
//! handlers — lives in sibling crates and is reached only through the traits
//! defined here.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod dispatch;
pub mod error;
pub mod mapping;
pub mod model;
pub mod module;
pub mod registry;

pub use dispatch::ModuleService;
pub use error::GatewayError;
pub use model::{FieldMap, GenericRequest, GenericResponse, Status, ValidationResult};
pub use module::Module;
pub use registry::ModuleRegistry;
