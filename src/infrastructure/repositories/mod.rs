//! Repository Implementations
//!
//! Concrete implementations of repository ports.

mod parameters;

pub use parameters::JsonParameterStore;
