//! Integration test common infrastructure.
//!
//! Provides utilities for spawning board servers and talking to them over HTTP.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::TestServer;
