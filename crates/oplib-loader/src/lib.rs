pub mod error;
pub mod loader;
pub mod resolve;
pub mod runner;
pub mod spec;

pub use error::LoadError;
pub use loader::{is_loaded, load_op_library, loaded_libraries, OpLibrary};
pub use resolve::{
    locate_op_library, path_to_datafile, path_to_datafile_in, search_dirs,
    shared_library_filename, DATA_DIR_ENV,
};
pub use runner::{run_spec, CallResult, RunSummary};
pub use spec::{CallSpec, LoadSpec};
