//! Testing infrastructure for provdash tests.
//!
//! - `FakeBackend`: scripted in-memory backend implementing `Backend`
//! - `FixtureServer`: the fake served over HTTP for end-to-end tests
//! - `fixtures`: sample backend payloads
//! - `TestWorld`: isolated environment for CLI integration tests

pub mod fake;
pub mod fixtures;
pub mod server;
pub mod world;

pub use fake::{Call, Endpoint, FakeBackend};
pub use server::FixtureServer;
pub use world::TestWorld;
