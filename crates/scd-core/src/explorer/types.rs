//! Explorer `getsourcecode` response structures.

use serde::{Deserialize, Deserializer, Serialize};

/// `message` value the explorer sends on success.
pub const SUCCESS_MESSAGE: &str = "OK";

/// `ABI` value the explorer sends for addresses without verified source.
pub const NOT_VERIFIED_ABI: &str = "Contract source code not verified";

/// Top-level explorer response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    /// On errors some explorers put a plain string here (e.g. "Invalid API Key");
    /// that decodes as an empty list so the message check reports the failure.
    #[serde(default, deserialize_with = "result_list")]
    pub result: Vec<ScanResult>,
}

/// One `getsourcecode` result entry. Field names follow the explorer's casing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanResult {
    #[serde(rename = "SourceCode")]
    pub source_code: String,
    #[serde(rename = "ABI")]
    pub abi: String,
    #[serde(rename = "ContractName")]
    pub contract_name: String,
    #[serde(rename = "CompilerVersion")]
    pub compiler_version: String,
    #[serde(rename = "OptimizationUsed")]
    pub optimization_used: String,
    #[serde(rename = "Runs")]
    pub runs: String,
    #[serde(rename = "ConstructorArguments")]
    pub constructor_arguments: String,
    #[serde(rename = "EVMVersion")]
    pub evm_version: String,
    #[serde(rename = "Library")]
    pub library: String,
    #[serde(rename = "LicenseType")]
    pub license_type: String,
    /// "1" for proxies, "0" otherwise.
    #[serde(rename = "Proxy")]
    pub proxy: String,
    #[serde(rename = "Implementation")]
    pub implementation: String,
    #[serde(rename = "SwarmSource")]
    pub swarm_source: String,
}

impl ScanResult {
    pub fn is_proxy(&self) -> bool {
        self.proxy.trim() == "1"
    }

    pub fn is_verified(&self) -> bool {
        self.abi != NOT_VERIFIED_ABI
    }
}

/// Compiler and licensing details carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerMetadata {
    pub compiler_version: String,
    pub optimization_used: String,
    pub runs: String,
    pub constructor_arguments: String,
    pub evm_version: String,
    pub library: String,
    pub license_type: String,
    pub swarm_source: String,
}

/// Terminal, verified explorer record for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRecord {
    /// Address whose query produced this record.
    pub address: String,
    pub contract_name: String,
    pub source_code: String,
    pub abi: String,
    pub proxy: bool,
    pub implementation: String,
    pub metadata: CompilerMetadata,
}

impl ContractRecord {
    pub fn from_result(address: &str, r: ScanResult) -> Self {
        let proxy = r.is_proxy();
        Self {
            address: address.to_string(),
            contract_name: r.contract_name,
            source_code: r.source_code,
            abi: r.abi,
            proxy,
            implementation: r.implementation,
            metadata: CompilerMetadata {
                compiler_version: r.compiler_version,
                optimization_used: r.optimization_used,
                runs: r.runs,
                constructor_arguments: r.constructor_arguments,
                evm_version: r.evm_version,
                library: r.library,
                license_type: r.license_type,
                swarm_source: r.swarm_source,
            },
        }
    }
}

fn result_list<'de, D>(deserializer: D) -> Result<Vec<ScanResult>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrOther {
        List(Vec<ScanResult>),
        Other(serde_json::Value),
    }

    Ok(match ListOrOther::deserialize(deserializer)? {
        ListOrOther::List(v) => v,
        ListOrOther::Other(_) => Vec::new(),
    })
}
