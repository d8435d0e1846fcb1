//! Ambient plumbing shared by Ecclesia services: configuration loading,
//! tracing setup, request ids, health endpoints and serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
