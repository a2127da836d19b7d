//! REST API layer for the integration gateway.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
