//! Terminal prompt adapters

mod terminal;

pub use terminal::DialoguerRegionPrompt;
