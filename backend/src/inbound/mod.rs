//! Inbound adapters that translate service outcomes into transport responses
//! while keeping framework details at the edge.
//!
//! HTTP rendering lives under [`http`].

pub mod http;
