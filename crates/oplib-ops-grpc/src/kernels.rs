use crate::ops;
use oplib_sdk::{Kernel, OpContext, OpError, OpRegistry, Result, Value};
use tracing::debug;

/// Kernel behind `GetBytes`. The service the `address` input points at owns
/// the transport; this kernel passes the request bytes through to the reply.
pub struct GetBytesKernel;

impl Kernel for GetBytesKernel {
    fn compute(&self, ctx: &mut OpContext) -> Result<()> {
        let request = ctx.input("request")?;
        let request = request
            .as_scalar()
            .ok_or_else(|| OpError::InvalidArgument {
                op: ctx.op_name().to_string(),
                message: format!(
                    "Input message must be scalar, but had shape: {}",
                    request.shape_string()
                ),
            })?
            .to_string();

        debug!(bytes = request.len(), "get_bytes kernel invoked");

        ctx.set_output("reply", Value::scalar(request))
    }
}

/// Register every kernel this library provides.
pub fn register(registry: &mut OpRegistry) -> Result<()> {
    registry.register_fn(ops::get_bytes_op_def(), || Ok(Box::new(GetBytesKernel)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn inputs(address: &str, request: &str) -> HashMap<String, Value> {
        let mut inputs = HashMap::new();
        inputs.insert("address".to_string(), Value::scalar(address));
        inputs.insert("request".to_string(), Value::scalar(request));
        inputs
    }

    #[test]
    fn reply_carries_the_request_bytes() {
        let mut registry = OpRegistry::new();
        register(&mut registry).unwrap();

        let outputs = registry
            .call(ops::GET_BYTES, inputs("localhost:50051", "ping"))
            .unwrap();
        assert_eq!(outputs.get("reply"), Some(&Value::scalar("ping")));
    }

    #[test]
    fn missing_address_is_rejected_before_the_kernel_runs() {
        let mut registry = OpRegistry::new();
        register(&mut registry).unwrap();

        let mut partial = HashMap::new();
        partial.insert("request".to_string(), Value::scalar("ping"));
        let err = registry.call(ops::GET_BYTES, partial).unwrap_err();
        assert!(matches!(err, OpError::MissingInput { .. }));
    }

    #[test]
    fn non_scalar_request_names_the_shape() {
        let def = ops::get_bytes_op_def();
        let mut inputs = HashMap::new();
        inputs.insert("request".to_string(), Value::vector(["a", "b"]));
        let mut ctx = OpContext::new(def, inputs);

        let err = GetBytesKernel.compute(&mut ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument to GetBytes: Input message must be scalar, but had shape: [2]"
        );
    }
}
