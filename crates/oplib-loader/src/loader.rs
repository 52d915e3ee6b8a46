use crate::error::LoadError;
use libloading::Library;
use oplib_sdk::{
    global_op_registry, OpLibraryDeclaration, ENTRY_SYMBOL, OP_LIBRARY_ABI_VERSION, SDK_VERSION,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Handle for a loaded operator library.
///
/// The underlying shared object stays mapped for the process lifetime; its
/// ops remain registered and callable until the process exits.
#[derive(Debug)]
pub struct OpLibrary {
    path: PathBuf,
    op_names: Vec<String>,
    _library: Library,
}

impl OpLibrary {
    /// Canonical path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the ops this library registered, sorted.
    pub fn op_names(&self) -> &[String] {
        &self.op_names
    }
}

static LOADED: OnceLock<Mutex<HashMap<PathBuf, Arc<OpLibrary>>>> = OnceLock::new();

fn loaded_table() -> &'static Mutex<HashMap<PathBuf, Arc<OpLibrary>>> {
    LOADED.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load a shared operator library and register its ops with the
/// process-wide registry.
///
/// Loading is idempotent per canonical path: asking for an already-loaded
/// artifact returns the existing handle without registering anything twice.
/// Any failure leaves the registry exactly as it was.
pub fn load_op_library(path: impl AsRef<Path>) -> Result<Arc<OpLibrary>, LoadError> {
    let requested = path.as_ref();
    let canonical = requested
        .canonicalize()
        .map_err(|source| LoadError::NotFound {
            path: requested.to_path_buf(),
            source,
        })?;

    // The table lock is held across the whole load so concurrent loads of
    // the same artifact register exactly once.
    let mut table = loaded_table().lock();
    if let Some(existing) = table.get(&canonical) {
        debug!(path = %canonical.display(), "op library already loaded");
        return Ok(existing.clone());
    }

    let library = unsafe { Library::new(&canonical) }.map_err(|source| LoadError::Open {
        path: canonical.clone(),
        source,
    })?;

    let declaration: OpLibraryDeclaration = unsafe {
        library
            .get::<*const OpLibraryDeclaration>(ENTRY_SYMBOL)
            .map_err(|source| LoadError::MissingSymbol {
                path: canonical.clone(),
                source,
            })?
            .read()
    };

    if declaration.abi_version != OP_LIBRARY_ABI_VERSION {
        return Err(LoadError::AbiMismatch {
            path: canonical,
            found: declaration.abi_version,
            expected: OP_LIBRARY_ABI_VERSION,
        });
    }
    if declaration.sdk_version != SDK_VERSION {
        return Err(LoadError::SdkMismatch {
            path: canonical,
            found: declaration.sdk_version.to_string(),
            expected: SDK_VERSION.to_string(),
        });
    }

    let mut registry = global_op_registry().write();
    let before: HashSet<String> = registry.op_names().into_iter().collect();

    match (declaration.register)(&mut registry) {
        Ok(()) => {
            let op_names: Vec<String> = registry
                .op_names()
                .into_iter()
                .filter(|name| !before.contains(name))
                .collect();
            drop(registry);

            info!(
                path = %canonical.display(),
                ops = ?op_names,
                "loaded op library"
            );

            let handle = Arc::new(OpLibrary {
                path: canonical.clone(),
                op_names,
                _library: library,
            });
            table.insert(canonical, handle.clone());
            Ok(handle)
        }
        Err(source) => {
            // Roll back whatever the library managed to register so a
            // failed load leaves the registry untouched.
            let added: Vec<String> = registry
                .op_names()
                .into_iter()
                .filter(|name| !before.contains(name))
                .collect();
            for name in &added {
                registry.remove(name);
            }
            Err(LoadError::Register {
                path: canonical,
                source,
            })
        }
    }
}

/// Whether the artifact at `path` has already been loaded.
pub fn is_loaded(path: impl AsRef<Path>) -> bool {
    match path.as_ref().canonicalize() {
        Ok(canonical) => loaded_table().lock().contains_key(&canonical),
        Err(_) => false,
    }
}

/// Handles for every library loaded so far, sorted by path.
pub fn loaded_libraries() -> Vec<Arc<OpLibrary>> {
    let table = loaded_table().lock();
    let mut libraries: Vec<Arc<OpLibrary>> = table.values().cloned().collect();
    libraries.sort_by(|a, b| a.path.cmp(&b.path));
    libraries
}
