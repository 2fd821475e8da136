use std::{error::Error, fmt};

use uuid::Uuid;

use crate::{
    catalog::render,
    envelope::{Params, ValidationDetail},
    kind::ErrorKind,
};

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A classified failure raised while serving a request.
///
/// Every `Failure` gets its own exception id when created. When it later
/// shows up as the cause of another failure, that id becomes the
/// correlation id of its link in the envelope chain.
#[derive(Debug)]
pub struct Failure {
    kind: ErrorKind,
    args: Vec<String>,
    exception_id: Uuid,
    correlation_id: Option<String>,
    violations: Vec<ValidationDetail>,
    params: Params,
    source: Option<BoxError>,
}

impl Failure {
    pub fn new(kind: ErrorKind) -> Self {
        Failure {
            kind,
            args: Vec::new(),
            exception_id: Uuid::new_v4(),
            correlation_id: None,
            violations: Vec::new(),
            params: Params::new(),
            source: None,
        }
    }

    pub fn invalid_file_path(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFilePath).with_arg(path)
    }

    pub fn invalid_directory_path(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDirectoryPath).with_arg(path)
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingParameter).with_arg(name)
    }

    pub fn resource_not_found(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceNotFound).with_arg(path)
    }

    pub fn method_not_allowed(method: impl Into<String>, supported: &[&str]) -> Self {
        Self::new(ErrorKind::MethodNotAllowed)
            .with_arg(method)
            .with_arg(supported.join(", "))
    }

    /// All violations found on `object`, reported together.
    pub fn validation(object: impl Into<String>, violations: Vec<ValidationDetail>) -> Self {
        let count = violations.len();
        Failure {
            violations,
            ..Self::new(ErrorKind::ValidationFailure)
                .with_arg(object)
                .with_arg(count.to_string())
        }
    }

    pub fn internal(source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::InternalServerError).with_source(source)
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn exception_id(&self) -> Uuid {
        self.exception_id
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn violations(&self) -> &[ValidationDetail] {
        &self.violations
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.kind.default_template(), &self.args))
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}
