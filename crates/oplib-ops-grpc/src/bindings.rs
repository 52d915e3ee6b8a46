//! Callable wrappers for the byte-service operators.
//!
//! Registration is explicit: call [`ensure_registered`] once before using
//! the wrappers. Nothing here mutates the registry as an import-time side
//! effect, so callers control when the process-wide mutation happens and
//! see any failure directly.

use crate::{kernels, ops};
use oplib_sdk::{call_op, global_op_registry, OpError, Result, Value};
use std::collections::HashMap;

/// Register this library's ops with the process-wide registry.
///
/// Idempotent: if the ops are already present (an earlier call here, or the
/// shared artifact loaded through the loader), nothing is registered twice
/// and the call succeeds.
pub fn ensure_registered() -> Result<()> {
    let mut registry = global_op_registry().write();
    if registry.contains(ops::GET_BYTES) {
        return Ok(());
    }
    kernels::register(&mut registry)
}

/// Invoke `GetBytes`: send `request` to the service at `address`, return the
/// reply bytes. Thin wrapper over the registered op; no argument or result
/// transformation happens here.
pub fn get_bytes(address: &str, request: &str) -> Result<String> {
    let mut inputs = HashMap::new();
    inputs.insert("address".to_string(), Value::scalar(address));
    inputs.insert("request".to_string(), Value::scalar(request));

    let mut outputs = call_op(ops::GET_BYTES, inputs)?;
    let reply = outputs
        .remove("reply")
        .ok_or_else(|| OpError::MissingOutput {
            op: ops::GET_BYTES.to_string(),
            output: "reply".to_string(),
        })?;

    reply
        .as_scalar()
        .map(str::to_string)
        .ok_or_else(|| OpError::InvalidArgument {
            op: ops::GET_BYTES.to_string(),
            message: format!("reply must be scalar, but had shape: {}", reply.shape_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oplib_sdk::OpRegistry;

    #[test]
    fn register_adds_exactly_the_defined_ops() {
        let mut registry = OpRegistry::new();
        crate::register(&mut registry).unwrap();
        assert_eq!(registry.op_names(), vec![ops::GET_BYTES.to_string()]);
    }

    #[test]
    fn ensure_registered_is_idempotent() {
        ensure_registered().unwrap();
        ensure_registered().unwrap();

        let registry = global_op_registry().read();
        let copies = registry
            .op_names()
            .into_iter()
            .filter(|name| name == ops::GET_BYTES)
            .count();
        assert_eq!(copies, 1);
    }

    #[test]
    fn get_bytes_round_trip() {
        ensure_registered().unwrap();

        let reply = get_bytes("localhost:50051", "ping").unwrap();
        assert_eq!(reply, "ping");
    }

    #[test]
    fn empty_request_round_trips() {
        ensure_registered().unwrap();

        let reply = get_bytes("localhost:50051", "").unwrap();
        assert_eq!(reply, "");
    }
}
