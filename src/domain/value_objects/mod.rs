//! Domain Value Objects
//!
//! Immutable value types that represent deployment concepts.

mod region;
mod secret;
mod step;

pub use region::{Region, ResourceGroup};
pub use secret::{Secret, REDACTED};
pub use step::{Step, StepPolicy};
