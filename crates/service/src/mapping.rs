use fmeta_envelope::Failure;
use fmeta_fs::PathError;

/// Classify a filesystem failure for the boundary.
///
/// Invalid-path errors keep the requested path as the message argument.
/// Everything else becomes an internal error carrying the raw cause.
pub fn path_failure(err: PathError) -> Failure {
    match err {
        PathError::InvalidFilePath(path) => Failure::invalid_file_path(path.display().to_string()),
        PathError::InvalidDirectoryPath(path) => {
            Failure::invalid_directory_path(path.display().to_string())
        }
        other => Failure::internal(other),
    }
}
