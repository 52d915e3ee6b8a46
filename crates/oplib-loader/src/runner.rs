use crate::loader::{load_op_library, OpLibrary};
use crate::spec::LoadSpec;
use anyhow::Context;
use oplib_sdk::{call_op, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Outputs of one op invocation, sorted by output name.
#[derive(Debug)]
pub struct CallResult {
    pub op: String,
    pub outputs: Vec<(String, Value)>,
}

/// What a run produced: the libraries loaded and each call's outputs.
#[derive(Debug)]
pub struct RunSummary {
    pub libraries: Vec<Arc<OpLibrary>>,
    pub calls: Vec<CallResult>,
}

/// Load every library in the spec, then perform every call against the
/// process-wide registry.
pub fn run_spec(spec: &LoadSpec) -> anyhow::Result<RunSummary> {
    let mut libraries = Vec::new();
    for path in &spec.libraries {
        let handle =
            load_op_library(path).with_context(|| format!("loading op library {path}"))?;
        libraries.push(handle);
    }

    let mut calls = Vec::new();
    for call in &spec.calls {
        debug!(op = %call.op, "invoking");
        let inputs: HashMap<String, Value> = call
            .inputs
            .iter()
            .map(|(name, value)| (name.clone(), Value::scalar(value.clone())))
            .collect();

        let outputs = call_op(&call.op, inputs).with_context(|| format!("calling {}", call.op))?;
        let mut outputs: Vec<(String, Value)> = outputs.into_iter().collect();
        outputs.sort_by(|a, b| a.0.cmp(&b.0));

        calls.push(CallResult {
            op: call.op.clone(),
            outputs,
        });
    }

    Ok(RunSummary { libraries, calls })
}
