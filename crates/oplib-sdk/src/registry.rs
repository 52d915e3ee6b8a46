use crate::error::{OpError, Result};
use crate::kernel::{Kernel, KernelFactory, OpContext};
use crate::opdef::OpDef;
use crate::value::Value;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

struct RegisteredOp {
    def: OpDef,
    factory: Box<dyn KernelFactory>,
}

/// Table mapping operation names to their definitions and kernel factories.
#[derive(Default)]
pub struct OpRegistry {
    ops: HashMap<String, RegisteredOp>,
}

impl OpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation. Registering a name twice is an error; the
    /// registry never silently replaces an op.
    pub fn register<F>(&mut self, def: OpDef, factory: F) -> Result<()>
    where
        F: KernelFactory + 'static,
    {
        let name = def.name().to_string();
        if self.ops.contains_key(&name) {
            return Err(OpError::AlreadyRegistered(name));
        }
        debug!(op = %name, "registering operator");
        self.ops.insert(
            name,
            RegisteredOp {
                def,
                factory: Box::new(factory),
            },
        );
        Ok(())
    }

    pub fn register_fn<F>(&mut self, def: OpDef, factory_fn: F) -> Result<()>
    where
        F: Fn() -> Result<Box<dyn Kernel>> + Send + Sync + 'static,
    {
        struct FnFactory<F> {
            f: F,
        }

        impl<F> KernelFactory for FnFactory<F>
        where
            F: Fn() -> Result<Box<dyn Kernel>> + Send + Sync,
        {
            fn create(&self) -> Result<Box<dyn Kernel>> {
                (self.f)()
            }
        }

        self.register(def, FnFactory { f: factory_fn })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&OpDef> {
        self.ops.get(name).map(|op| &op.def)
    }

    /// Registered operation names, sorted for stable listings.
    pub fn op_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ops.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Remove an operation. Used by the loader to roll back a partially
    /// registered library; not part of the public unload surface.
    pub fn remove(&mut self, name: &str) -> bool {
        self.ops.remove(name).is_some()
    }

    /// Invoke an operation: signature check, kernel creation, compute,
    /// declared-output verification.
    pub fn call(&self, name: &str, inputs: HashMap<String, Value>) -> Result<HashMap<String, Value>> {
        let op = self
            .ops
            .get(name)
            .ok_or_else(|| OpError::UnknownOp(name.to_string()))?;

        op.def.check_inputs(&inputs)?;

        let kernel = op.factory.create()?;
        let mut ctx = OpContext::new(op.def.clone(), inputs);
        kernel.compute(&mut ctx)?;
        ctx.into_outputs()
    }
}

/// Process-wide operator registry. Registration persists for the process
/// lifetime; there is no teardown path.
static GLOBAL: OnceLock<RwLock<OpRegistry>> = OnceLock::new();

pub fn global_op_registry() -> &'static RwLock<OpRegistry> {
    GLOBAL.get_or_init(|| RwLock::new(OpRegistry::new()))
}

/// Register an operation with the process-wide registry.
pub fn register_op<F>(def: OpDef, factory: F) -> Result<()>
where
    F: KernelFactory + 'static,
{
    global_op_registry().write().register(def, factory)
}

/// Invoke an operation registered with the process-wide registry.
pub fn call_op(name: &str, inputs: HashMap<String, Value>) -> Result<HashMap<String, Value>> {
    global_op_registry().read().call(name, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoKernel;

    impl Kernel for EchoKernel {
        fn compute(&self, ctx: &mut OpContext) -> Result<()> {
            let request = ctx.input("request")?.clone();
            ctx.set_output("reply", request)
        }
    }

    struct ForgetfulKernel;

    impl Kernel for ForgetfulKernel {
        fn compute(&self, _ctx: &mut OpContext) -> Result<()> {
            Ok(())
        }
    }

    fn echo_def(name: &str) -> OpDef {
        OpDef::builder(name).input("request").output("reply").build()
    }

    fn echo_inputs(payload: &str) -> HashMap<String, Value> {
        let mut inputs = HashMap::new();
        inputs.insert("request".to_string(), Value::scalar(payload));
        inputs
    }

    #[test]
    fn register_and_call() {
        let mut registry = OpRegistry::new();
        registry
            .register_fn(echo_def("Echo"), || Ok(Box::new(EchoKernel)))
            .unwrap();

        let outputs = registry.call("Echo", echo_inputs("ping")).unwrap();
        assert_eq!(outputs.get("reply"), Some(&Value::scalar("ping")));
    }

    #[test]
    fn duplicate_registration_is_an_error() {
        let mut registry = OpRegistry::new();
        registry
            .register_fn(echo_def("Echo"), || Ok(Box::new(EchoKernel)))
            .unwrap();

        let err = registry
            .register_fn(echo_def("Echo"), || Ok(Box::new(EchoKernel)))
            .unwrap_err();
        assert!(matches!(err, OpError::AlreadyRegistered(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_op_is_reported() {
        let registry = OpRegistry::new();
        let err = registry.call("Nope", HashMap::new()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown operator: Nope");
    }

    #[test]
    fn kernel_must_produce_declared_outputs() {
        let mut registry = OpRegistry::new();
        registry
            .register_fn(echo_def("Forgetful"), || Ok(Box::new(ForgetfulKernel)))
            .unwrap();

        let err = registry.call("Forgetful", echo_inputs("ping")).unwrap_err();
        assert!(matches!(err, OpError::MissingOutput { .. }));
    }

    #[test]
    fn op_names_are_sorted() {
        let mut registry = OpRegistry::new();
        registry
            .register_fn(echo_def("Zeta"), || Ok(Box::new(EchoKernel)))
            .unwrap();
        registry
            .register_fn(echo_def("Alpha"), || Ok(Box::new(EchoKernel)))
            .unwrap();

        assert_eq!(registry.op_names(), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn global_registry_register_and_call() {
        // Unique name: the global registry is shared across the test process.
        register_op_fn_for_test("GlobalEchoRegistryTest");

        let outputs = call_op("GlobalEchoRegistryTest", echo_inputs("ping")).unwrap();
        assert_eq!(outputs.get("reply"), Some(&Value::scalar("ping")));
    }

    fn register_op_fn_for_test(name: &str) {
        global_op_registry()
            .write()
            .register_fn(echo_def(name), || Ok(Box::new(EchoKernel)))
            .unwrap();
    }
}
