use std::fmt;

/// HTTP-style status class a failure maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Internal,
}

impl StatusClass {
    pub const fn code(self) -> u16 {
        match self {
            StatusClass::BadRequest => 400,
            StatusClass::NotFound => 404,
            StatusClass::MethodNotAllowed => 405,
            StatusClass::Internal => 500,
        }
    }

    /// Reason token as carried in the envelope's `httpStatus` field.
    pub const fn reason(self) -> &'static str {
        match self {
            StatusClass::BadRequest => "BAD_REQUEST",
            StatusClass::NotFound => "NOT_FOUND",
            StatusClass::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            StatusClass::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    #[inline]
    pub const fn is_internal(self) -> bool {
        matches!(self, StatusClass::Internal)
    }
}

/// Stable classification of every failure the service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    InvalidFilePath,
    InvalidDirectoryPath,
    MissingParameter,
    ValidationFailure,
    ResourceNotFound,
    MethodNotAllowed,
    /// Catch-all. Its message never carries details of the underlying cause.
    InternalServerError,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::InvalidFilePath,
        ErrorKind::InvalidDirectoryPath,
        ErrorKind::MissingParameter,
        ErrorKind::ValidationFailure,
        ErrorKind::ResourceNotFound,
        ErrorKind::MethodNotAllowed,
        ErrorKind::InternalServerError,
    ];

    /// Machine-readable code, stable across releases.
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidFilePath => "INVALID_FILE_PATH",
            ErrorKind::InvalidDirectoryPath => "INVALID_DIRECTORY_PATH",
            ErrorKind::MissingParameter => "MISSING_PARAMETER",
            ErrorKind::ValidationFailure => "VALIDATION_FAILURE",
            ErrorKind::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorKind::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ErrorKind::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub const fn status(self) -> StatusClass {
        match self {
            ErrorKind::InvalidFilePath
            | ErrorKind::InvalidDirectoryPath
            | ErrorKind::ResourceNotFound => StatusClass::NotFound,
            ErrorKind::MissingParameter | ErrorKind::ValidationFailure => StatusClass::BadRequest,
            ErrorKind::MethodNotAllowed => StatusClass::MethodNotAllowed,
            ErrorKind::InternalServerError => StatusClass::Internal,
        }
    }

    /// Built-in message template; `{N}` is replaced by the N-th argument.
    pub const fn default_template(self) -> &'static str {
        match self {
            ErrorKind::InvalidFilePath => "Invalid file path: {0}",
            ErrorKind::InvalidDirectoryPath => "Invalid directory path: {0}",
            ErrorKind::MissingParameter => "{0} parameter is missing",
            ErrorKind::ValidationFailure => "Validation failed for {0} with {1} error(s)",
            ErrorKind::ResourceNotFound => "No resource found at {0}",
            ErrorKind::MethodNotAllowed => {
                "{0} method is not supported for this request. Supported methods are {1}"
            }
            ErrorKind::InternalServerError => {
                "An unexpected error occurred. Quote the exception id when reporting this problem."
            }
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
