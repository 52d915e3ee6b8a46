use crate::error::Result;
use crate::registry::OpRegistry;

/// Bumped whenever the declaration layout or registration contract changes.
pub const OP_LIBRARY_ABI_VERSION: u32 = 1;

/// Version of the SDK a library was compiled against. Because this constant
/// is read through the library's own copy of the SDK, a dependency skew
/// between loader and library shows up as a mismatch before any
/// registration runs.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Symbol the loader resolves in a shared operator library.
pub static ENTRY_SYMBOL: &[u8] = b"OPLIB_OP_LIBRARY\0";

pub type RegisterFn = fn(&mut OpRegistry) -> Result<()>;

/// The record a loadable operator library exports under [`ENTRY_SYMBOL`].
pub struct OpLibraryDeclaration {
    pub abi_version: u32,
    pub sdk_version: &'static str,
    pub register: RegisterFn,
}

/// Export the declaration the loader looks for.
///
/// ```ignore
/// fn register(registry: &mut OpRegistry) -> oplib_sdk::Result<()> { ... }
/// oplib_sdk::declare_op_library!(register);
/// ```
#[macro_export]
macro_rules! declare_op_library {
    ($register:path) => {
        #[no_mangle]
        pub static OPLIB_OP_LIBRARY: $crate::plugin::OpLibraryDeclaration =
            $crate::plugin::OpLibraryDeclaration {
                abi_version: $crate::plugin::OP_LIBRARY_ABI_VERSION,
                sdk_version: $crate::plugin::SDK_VERSION,
                register: $register,
            };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn noop_register(_registry: &mut OpRegistry) -> Result<()> {
        Ok(())
    }

    crate::declare_op_library!(noop_register);

    #[test]
    fn declaration_carries_current_versions() {
        assert_eq!(OPLIB_OP_LIBRARY.abi_version, OP_LIBRARY_ABI_VERSION);
        assert_eq!(OPLIB_OP_LIBRARY.sdk_version, SDK_VERSION);

        let mut registry = OpRegistry::new();
        assert!((OPLIB_OP_LIBRARY.register)(&mut registry).is_ok());
    }

    #[test]
    fn entry_symbol_is_nul_terminated() {
        assert_eq!(ENTRY_SYMBOL.last(), Some(&0));
    }
}
