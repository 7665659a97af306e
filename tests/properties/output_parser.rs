//! Property tests for contract deployer output parsing.

use proptest::prelude::*;

use scdeploy::domain::entities::ContractOutcome;
use scdeploy::domain::services::{OutputSource, RESULT_SENTINEL};
use scdeploy::parse_contract_output;

fn chatter() -> impl Strategy<Value = String> {
    // Compiler and unlock noise; never contains a brace.
    proptest::string::string_regex("[A-Za-z0-9 .:\\-\n]{0,120}")
        .unwrap()
        .prop_filter("no sentinel", |s| !s.contains(RESULT_SENTINEL.trim_end()))
}

fn address() -> impl Strategy<Value = String> {
    proptest::string::string_regex("0x[0-9a-f]{40}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics, whatever the deployer printed.
    #[test]
    fn property_parse_never_panics(
        text in "(?s).{0,512}",
        structured in proptest::option::of("(?s).{0,128}"),
    ) {
        let _ = parse_contract_output(&text, structured.as_deref());
    }

    /// PROPERTY: A result object at the end of arbitrary chatter is always found.
    #[test]
    fn property_trailing_object_found_after_chatter(
        noise in chatter(),
        account in address(),
        contract in address(),
    ) {
        let text = format!(
            "{}{{\"accountAddress\":\"{}\",\"contractAddress\":\"{}\"}}",
            noise, account, contract
        );

        let parsed = parse_contract_output(&text, None);

        prop_assert_eq!(parsed.source, OutputSource::TrailingJson);
        prop_assert_eq!(
            parsed.output.outcome(),
            ContractOutcome::Deployed { account, contract }
        );
    }

    /// PROPERTY: Output without any brace is never mistaken for a result.
    #[test]
    fn property_no_object_means_no_result(noise in chatter()) {
        let parsed = parse_contract_output(&noise, None);

        prop_assert_eq!(parsed.source, OutputSource::None);
        prop_assert!(parsed.diagnostic.is_some());
        let is_failed = matches!(parsed.output.outcome(), ContractOutcome::Failed(_));
        prop_assert!(is_failed);
    }

    /// PROPERTY: The result file wins over whatever the text says.
    #[test]
    fn property_result_file_takes_precedence(
        noise in chatter(),
        contract in address(),
    ) {
        let text = format!("{}{{\"error\":\"from stdout\"}}", noise);
        let structured = format!(
            "{{\"accountAddress\":\"0x1\",\"contractAddress\":\"{}\"}}",
            contract
        );

        let parsed = parse_contract_output(&text, Some(&structured));

        prop_assert_eq!(parsed.source, OutputSource::ResultFile);
        prop_assert_eq!(parsed.output.contract_address, Some(contract));
    }
}
