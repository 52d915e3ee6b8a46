use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// YAML run configuration: libraries to load, then ops to invoke.
///
/// ```yaml
/// libraries:
///   - target/release/libgrpc_ops.so
/// calls:
///   - op: GetBytes
///     inputs:
///       address: "localhost:50051"
///       request: "ping"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSpec {
    #[serde(default)]
    pub libraries: Vec<String>,
    #[serde(default)]
    pub calls: Vec<CallSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSpec {
    pub op: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}
