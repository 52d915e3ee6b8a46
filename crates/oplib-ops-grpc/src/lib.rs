pub mod bindings;
pub mod kernels;
pub mod ops;

use oplib_sdk::{OpRegistry, Result};

/// Register every op this library defines.
pub fn register(registry: &mut OpRegistry) -> Result<()> {
    kernels::register(registry)
}

oplib_sdk::declare_op_library!(register);

// Enumerated public surface: exactly the ops this library defines, no globs.
pub use bindings::{ensure_registered, get_bytes};
pub use kernels::GetBytesKernel;
pub use ops::{get_bytes_op_def, GET_BYTES};
