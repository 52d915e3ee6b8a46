pub mod error;
pub mod kernel;
pub mod opdef;
pub mod plugin;
pub mod registry;
pub mod value;

pub use error::{OpError, Result};
pub use kernel::{Kernel, KernelFactory, OpContext};
pub use opdef::{scalar_inputs_and_outputs, ArgDef, OpDef, OpDefBuilder, ShapeFn};
pub use plugin::{
    OpLibraryDeclaration, RegisterFn, ENTRY_SYMBOL, OP_LIBRARY_ABI_VERSION, SDK_VERSION,
};
pub use registry::{call_op, global_op_registry, register_op, OpRegistry};
pub use value::Value;
