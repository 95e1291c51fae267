//! HTTP request handlers, one module per concern
//!
//! Every handler follows the same state machine: validate inputs, check the
//! backend is configured, call the backend (concurrently where calls are
//! independent), and translate the result into the uniform envelope.

pub mod catalogo;
pub mod chat;
pub mod clientes;
pub mod cotizacion;
pub mod galeria;
pub mod health;
pub mod ofertas;
