//! Terminal output for the scdeploy binary

pub mod console;
pub mod context;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
