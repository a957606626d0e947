//! Adapters Layer
//!
//! Inbound adapters feed the form; outbound adapters implement its ports.

pub mod inbound;
pub mod outbound;
