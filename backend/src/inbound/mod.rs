//! Inbound adapters translating external requests into domain service calls
//! while keeping framework details at the edge.
//!
//! - [`http`]: dashboard pages, JSON API and health probes.
//! - [`cli`]: operator console commands.

pub mod cli;
pub mod http;
