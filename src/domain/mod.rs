//! Domain models and pure helpers shared across the gateway
//!
//! The backend module maps raw backend records into these public shapes;
//! route handlers only ever serialize these.

pub mod brand;
pub mod offer;

pub use offer::{ElementoPublico, OfertaPublica};
