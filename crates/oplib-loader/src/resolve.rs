use crate::error::LoadError;
use std::env;
use std::path::PathBuf;

/// Environment variable naming the directory installed data files live in.
pub const DATA_DIR_ENV: &str = "OPLIB_DATA_DIR";

/// Platform shared-library file name for a library stem,
/// e.g. `grpc_ops` -> `libgrpc_ops.so` on Linux.
pub fn shared_library_filename(stem: &str) -> String {
    format!("{}{}{}", env::consts::DLL_PREFIX, stem, env::consts::DLL_SUFFIX)
}

/// Directories searched for data files, in order: `OPLIB_DATA_DIR`, the
/// running executable's directory, the current directory.
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            dirs.push(PathBuf::from(dir));
        }
    }

    if let Ok(exe) = env::current_exe() {
        if let Some(parent) = exe.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = env::current_dir() {
        dirs.push(cwd);
    }

    dirs
}

/// Locate a data file by trying each directory in order.
pub fn path_to_datafile_in(dirs: &[PathBuf], file_name: &str) -> Result<PathBuf, LoadError> {
    for dir in dirs {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(LoadError::DataFileNotFound {
        name: file_name.to_string(),
        searched: dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Locate a data file in the default search directories.
pub fn path_to_datafile(file_name: &str) -> Result<PathBuf, LoadError> {
    path_to_datafile_in(&search_dirs(), file_name)
}

/// Locate a shared operator library by stem, using platform naming.
pub fn locate_op_library(stem: &str) -> Result<PathBuf, LoadError> {
    path_to_datafile(&shared_library_filename(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_uses_platform_conventions() {
        let name = shared_library_filename("grpc_ops");
        assert_eq!(
            name,
            format!("{}grpc_ops{}", env::consts::DLL_PREFIX, env::consts::DLL_SUFFIX)
        );
        assert!(name.contains("grpc_ops"));
    }

    #[test]
    fn datafile_found_in_search_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ops.bin");
        std::fs::write(&file, b"payload").unwrap();

        let found = path_to_datafile_in(&[dir.path().to_path_buf()], "ops.bin").unwrap();
        assert_eq!(found, file);
    }

    #[test]
    fn missing_datafile_lists_searched_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            path_to_datafile_in(&[dir.path().to_path_buf()], "absent.bin").unwrap_err();

        match err {
            LoadError::DataFileNotFound { name, searched } => {
                assert_eq!(name, "absent.bin");
                assert!(searched.contains(&dir.path().display().to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn directories_are_tried_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("ops.bin"), b"1").unwrap();
        std::fs::write(second.path().join("ops.bin"), b"2").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = path_to_datafile_in(&dirs, "ops.bin").unwrap();
        assert_eq!(found, first.path().join("ops.bin"));
    }
}
