//! Domain Layer
//!
//! Pure business types, ports and services. No I/O lives here.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;
