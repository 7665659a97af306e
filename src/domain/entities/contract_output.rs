//! Contract Deployer Result Entity

use serde::Serialize;
use serde_json::Value;

/// Fields reported by the contract deployer's result object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractOutput {
    pub error: Option<String>,
    pub account_address: Option<String>,
    pub contract_address: Option<String>,
}

/// What the run amounts to once the fields are interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractOutcome {
    Deployed { account: String, contract: String },
    Failed(String),
}

impl ContractOutput {
    /// Extract the known fields from a result object. Values that are not
    /// strings are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            error: field("error"),
            account_address: field("accountAddress"),
            contract_address: field("contractAddress"),
        }
    }

    pub fn outcome(&self) -> ContractOutcome {
        if let Some(error) = &self.error {
            return ContractOutcome::Failed(error.clone());
        }
        match (&self.account_address, &self.contract_address) {
            (Some(account), Some(contract)) => ContractOutcome::Deployed {
                account: account.clone(),
                contract: contract.clone(),
            },
            _ => ContractOutcome::Failed(
                "result did not contain accountAddress and contractAddress".to_string(),
            ),
        }
    }
}
