//! Domain Services
//!
//! Stateless logic used by the deploy use case.

mod output_parser;
mod parameter_rewriter;
mod readiness;

pub use output_parser::{parse_contract_output, OutputSource, ParsedOutput, RESULT_SENTINEL};
pub use parameter_rewriter::{resolve_vnet_name, rewrite_parameters, ParameterKeys};
pub use readiness::{wait_until_ready, ProbeAttempt, ReadinessPolicy};
