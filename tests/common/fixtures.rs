//! Test fixtures - reusable content constants for tests.

pub const ACCOUNT_PASSWORD: &str = "S3cret!pass";
pub const RPC_ENDPOINT: &str = "http://10.0.0.4:8545";
pub const STORAGE_KEY: &str = "c3RvcmFnZS1rZXk=";

/// Consortium parameters as shipped with the templates
pub const CONSORTIUM_PARAMETERS: &str = r#"{
  "$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentParameters.json#",
  "contentVersion": "1.0.0.0",
  "parameters": {
    "namePrefix": {
      "value": "sc"
    },
    "ethereumAccountPsswd": {
      "value": "S3cret!pass"
    },
    "ethereumAccountPassphrase": {
      "value": "correct horse"
    },
    "numMiningNodesRegion1": {
      "value": 2
    }
  }
}
"#;

/// Supply-chain parameters before the rewrite
pub const SUPPLYCHAIN_PARAMETERS: &str = r#"{
  "$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentParameters.json#",
  "contentVersion": "1.0.0.0",
  "parameters": {
    "namePrefix": {
      "value": ""
    },
    "ethereumAccountPsswd": {
      "value": ""
    },
    "vnetName": {
      "value": ""
    },
    "appServiceSku": {
      "value": "S1",
      "metadata": {
        "description": "App service plan tier"
      }
    }
  }
}
"#;

/// Minimal ARM template; the fakes never look inside
pub const TEMPLATE: &str = r#"{
  "$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentTemplate.json#",
  "contentVersion": "1.0.0.0",
  "resources": []
}
"#;

/// Typical mixed deployer output: compiler chatter, then the result object
pub const CONTRACT_OUTPUT: &str = "Compiling SupplyChain.sol...\n\
Unlocking account...\n\
Deploying...{\"accountAddress\":\"0xAA\",\"contractAddress\":\"0xBB\"}";
