use crate::error::{OpError, Result};
use crate::opdef::OpDef;
use crate::value::Value;
use std::collections::HashMap;

/// Per-invocation carrier handed to a kernel: the validated inputs and a
/// slot for each declared output.
pub struct OpContext {
    def: OpDef,
    inputs: HashMap<String, Value>,
    outputs: HashMap<String, Value>,
}

impl OpContext {
    pub fn new(def: OpDef, inputs: HashMap<String, Value>) -> Self {
        Self {
            def,
            inputs,
            outputs: HashMap::new(),
        }
    }

    pub fn op_name(&self) -> &str {
        self.def.name()
    }

    pub fn input(&self, name: &str) -> Result<&Value> {
        self.inputs.get(name).ok_or_else(|| OpError::MissingInput {
            op: self.def.name().to_string(),
            input: name.to_string(),
        })
    }

    /// Store an output value. The name must be declared by the op.
    pub fn set_output(&mut self, name: &str, value: Value) -> Result<()> {
        if !self.def.has_output(name) {
            return Err(OpError::UnknownOutput {
                op: self.def.name().to_string(),
                output: name.to_string(),
            });
        }
        self.outputs.insert(name.to_string(), value);
        Ok(())
    }

    /// Verify every declared output was produced, then hand them back.
    pub fn into_outputs(self) -> Result<HashMap<String, Value>> {
        for arg in self.def.outputs() {
            if !self.outputs.contains_key(&arg.name) {
                return Err(OpError::MissingOutput {
                    op: self.def.name().to_string(),
                    output: arg.name.clone(),
                });
            }
        }
        Ok(self.outputs)
    }
}

/// Kernel trait - the computation behind a registered operation.
pub trait Kernel: Send + Sync {
    fn compute(&self, ctx: &mut OpContext) -> Result<()>;
}

/// Factory for creating kernels. One factory is registered per operation;
/// a kernel is created per invocation.
pub trait KernelFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn Kernel>>;
}
