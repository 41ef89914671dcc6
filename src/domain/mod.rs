//! Domain layer for the Reforge evaluation core.
//!
//! Pure data models and the port traits the services depend on. Nothing in
//! this layer performs I/O.

pub mod models;
pub mod ports;
