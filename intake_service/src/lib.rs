//! Beneficiary intake service library following hexagonal architecture.
//!
//! Domain logic (ports, the intake service, report aggregation) lives under
//! [`domain`]; HTTP adapters under [`inbound`]; storage backends under
//! [`outbound`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
