use std::{path::Path, sync::Arc};

use fmeta_envelope::{
    EnvelopeFactory, ErrorCatalog, Failure, FailureCounter, FailureInterceptor, RequestContext,
};
use fmeta_fs::{Expect, FileRecord, build, list_files, walk};
use fmeta_protocol::{ApiRequest, ApiResponse, HealthReport, context_for};
use log::{debug, info};

use crate::mapping::path_failure;

/// Serves the metadata operations and turns every failure into an envelope.
pub struct MetadataService {
    factory: EnvelopeFactory,
    failures: Arc<FailureCounter>,
}

impl MetadataService {
    pub fn new(app_name: impl Into<String>, catalog: ErrorCatalog) -> Self {
        let failures = Arc::new(FailureCounter::new());
        let factory = EnvelopeFactory::new(app_name, catalog).with_interceptor(Arc::clone(&failures));
        MetadataService { factory, failures }
    }

    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl FailureInterceptor + 'static) -> Self {
        self.factory = self.factory.with_interceptor(interceptor);
        self
    }

    pub fn app_name(&self) -> &str {
        self.factory.app_name()
    }

    /// Leaf record of a regular file. Symbolic links to files are accepted.
    pub fn get_file_metadata(&self, path: &Path) -> Result<FileRecord, Failure> {
        debug!("[service] file {}", path.display());
        build(path, Expect::File).map_err(path_failure)
    }

    /// Full tree rooted at a directory.
    pub fn get_directory_metadata(&self, path: &Path) -> Result<FileRecord, Failure> {
        debug!("[service] directory {}", path.display());
        let tree = walk(path).map_err(path_failure)?;
        info!(
            "[service] built tree of {} record(s) for {}",
            tree.count(),
            path.display()
        );
        Ok(tree)
    }

    /// Flat pre-order listing down to `depth` levels below `path`.
    pub fn list_files(&self, path: &Path, depth: usize) -> Result<Vec<FileRecord>, Failure> {
        debug!("[service] list {} depth={depth}", path.display());
        list_files(path, depth).map_err(path_failure)
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "UP".to_owned(),
            service: self.app_name().to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            failures: self.failures.snapshot(),
        }
    }

    pub fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, Failure> {
        Ok(match request {
            ApiRequest::GetFileMetadata { path } => ApiResponse::Record(self.get_file_metadata(path)?),
            ApiRequest::GetDirectoryMetadata { path } => {
                ApiResponse::Record(self.get_directory_metadata(path)?)
            }
            ApiRequest::ListFiles { path, depth } => {
                ApiResponse::Listing(self.list_files(path, *depth)?)
            }
            ApiRequest::Health => ApiResponse::Health(self.health()),
        })
    }

    /// Parse, validate and run one raw request target.
    pub fn dispatch(&self, method: &str, target: &str) -> ApiResponse {
        self.serve(method, &context_for(target))
    }

    /// Validate and run a request whose parameters are already decoded.
    pub fn serve(&self, method: &str, ctx: &RequestContext) -> ApiResponse {
        match ApiRequest::parse(method, ctx).and_then(|req| self.execute(&req)) {
            Ok(response) => response,
            Err(failure) => self.fail(&failure, ctx),
        }
    }

    /// Publish `failure` and wrap its envelope as a response.
    pub fn fail(&self, failure: &Failure, ctx: &RequestContext) -> ApiResponse {
        ApiResponse::Failure(self.factory.handle(failure, ctx))
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
