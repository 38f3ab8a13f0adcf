//! Reply-generation boundary for Confab.
//!
//! This module defines the `ResponseGenerator` trait that reply backends
//! implement (model APIs, retrieval pipelines) and the pure `EchoGenerator`
//! demo used as the reference implementation and in tests.

pub mod echo;
pub mod provider;

pub use echo::EchoGenerator;
pub use provider::ResponseGenerator;
