pub mod check;
pub mod deploy;
pub mod parse_output;
