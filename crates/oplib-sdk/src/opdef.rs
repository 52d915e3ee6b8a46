use crate::error::{OpError, Result};
use crate::value::Value;
use std::collections::HashMap;

/// A named input or output slot of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgDef {
    pub name: String,
}

/// Signature check run over the supplied inputs before a kernel is created.
pub type ShapeFn = fn(&OpDef, &HashMap<String, Value>) -> Result<()>;

/// Operation signature: name, input/output slots and invocation rules.
#[derive(Clone, Debug)]
pub struct OpDef {
    name: String,
    inputs: Vec<ArgDef>,
    outputs: Vec<ArgDef>,
    stateful: bool,
    doc: Option<String>,
    shape_fn: ShapeFn,
}

impl OpDef {
    pub fn builder(name: impl Into<String>) -> OpDefBuilder {
        OpDefBuilder {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            stateful: false,
            doc: None,
            shape_fn: scalar_inputs_and_outputs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[ArgDef] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ArgDef] {
        &self.outputs
    }

    pub fn is_stateful(&self) -> bool {
        self.stateful
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|a| a.name == name)
    }

    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.iter().any(|a| a.name == name)
    }

    /// Rendered signature for listings, e.g. `GetBytes(address, request) -> (reply)`.
    pub fn signature(&self) -> String {
        let ins: Vec<&str> = self.inputs.iter().map(|a| a.name.as_str()).collect();
        let outs: Vec<&str> = self.outputs.iter().map(|a| a.name.as_str()).collect();
        format!("{}({}) -> ({})", self.name, ins.join(", "), outs.join(", "))
    }

    /// Run the op's shape function over the supplied inputs.
    pub fn check_inputs(&self, inputs: &HashMap<String, Value>) -> Result<()> {
        (self.shape_fn)(self, inputs)
    }
}

/// Default shape rule: every declared input present, nothing undeclared,
/// all values scalar. Outputs of ops using this rule are scalar as well.
pub fn scalar_inputs_and_outputs(def: &OpDef, inputs: &HashMap<String, Value>) -> Result<()> {
    for arg in def.inputs() {
        let value = inputs
            .get(&arg.name)
            .ok_or_else(|| OpError::MissingInput {
                op: def.name().to_string(),
                input: arg.name.clone(),
            })?;
        if !value.is_scalar() {
            return Err(OpError::NotScalar {
                op: def.name().to_string(),
                input: arg.name.clone(),
                shape: value.shape_string(),
            });
        }
    }
    for name in inputs.keys() {
        if !def.has_input(name) {
            return Err(OpError::UnexpectedInput {
                op: def.name().to_string(),
                input: name.clone(),
            });
        }
    }
    Ok(())
}

pub struct OpDefBuilder {
    name: String,
    inputs: Vec<ArgDef>,
    outputs: Vec<ArgDef>,
    stateful: bool,
    doc: Option<String>,
    shape_fn: ShapeFn,
}

impl OpDefBuilder {
    pub fn input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(ArgDef { name: name.into() });
        self
    }

    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.outputs.push(ArgDef { name: name.into() });
        self
    }

    pub fn stateful(mut self) -> Self {
        self.stateful = true;
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn shape_fn(mut self, shape_fn: ShapeFn) -> Self {
        self.shape_fn = shape_fn;
        self
    }

    pub fn build(self) -> OpDef {
        OpDef {
            name: self.name,
            inputs: self.inputs,
            outputs: self.outputs,
            stateful: self.stateful,
            doc: self.doc,
            shape_fn: self.shape_fn,
        }
    }
}
