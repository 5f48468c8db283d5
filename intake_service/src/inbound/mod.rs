//! Inbound adapters: the HTTP surface.

pub mod http;
mod swagger;

pub use http::{router, setup_and_serve};
