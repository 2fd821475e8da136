use std::{
    collections::BTreeMap,
    error::Error,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, Mutex},
};

use chrono::Utc;
use log::{error, warn};
use uuid::Uuid;

use crate::{
    catalog::ErrorCatalog,
    chain::{describe_chain, describe_error, exception_chain},
    envelope::{ErrorDetail, ErrorEnvelope, RequestContext, redact_params},
    failure::Failure,
    kind::ErrorKind,
};

/// Observer offered every envelope after it is built.
///
/// Interceptors cannot change the response. Errors they return and panics
/// they raise are logged and otherwise ignored.
pub trait FailureInterceptor: Send + Sync {
    fn name(&self) -> &str {
        "interceptor"
    }

    fn handle(
        &self,
        envelope: &ErrorEnvelope,
        cause: &(dyn Error + 'static),
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

impl<T: FailureInterceptor + ?Sized> FailureInterceptor for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn handle(
        &self,
        envelope: &ErrorEnvelope,
        cause: &(dyn Error + 'static),
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        (**self).handle(envelope, cause)
    }
}

/// Counts published envelopes per error code.
#[derive(Debug, Default)]
pub struct FailureCounter {
    counts: Mutex<BTreeMap<String, u64>>,
}

impl FailureCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        match self.counts.lock() {
            Ok(counts) => counts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FailureInterceptor for FailureCounter {
    fn name(&self) -> &str {
        "failure-counter"
    }

    fn handle(
        &self,
        envelope: &ErrorEnvelope,
        _cause: &(dyn Error + 'static),
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut counts = self
            .counts
            .lock()
            .map_err(|_| "failure counter lock poisoned")?;
        *counts.entry(envelope.app_error_code.clone()).or_default() += 1;
        Ok(())
    }
}

/// Builds error envelopes for one application.
pub struct EnvelopeFactory {
    app_name: String,
    catalog: ErrorCatalog,
    interceptors: Vec<Box<dyn FailureInterceptor>>,
}

impl EnvelopeFactory {
    pub fn new(app_name: impl Into<String>, catalog: ErrorCatalog) -> Self {
        EnvelopeFactory {
            app_name: app_name.into(),
            catalog,
            interceptors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl FailureInterceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        &self.catalog
    }

    /// Envelope for `kind` raised while serving `ctx`.
    ///
    /// `cause`, when given, fills `cause` and one chain link per error in its
    /// source chain. Both are left out for internal errors.
    pub fn build_envelope<S: AsRef<str>>(
        &self,
        kind: ErrorKind,
        ctx: &RequestContext,
        args: &[S],
        cause: Option<&(dyn Error + 'static)>,
    ) -> ErrorEnvelope {
        let status = kind.status();
        let (cause, errors) = match cause {
            Some(err) if !status.is_internal() => (
                Some(describe_error(err, &self.catalog)),
                exception_chain(err, &self.catalog)
                    .into_iter()
                    .map(ErrorDetail::Chain)
                    .collect(),
            ),
            _ => (None, Vec::new()),
        };

        ErrorEnvelope {
            application_name: self.app_name.clone(),
            http_status: status.reason().to_owned(),
            http_status_code: status.code(),
            timestamp: Utc::now(),
            error_description: self.catalog.describe(kind, args),
            cause,
            path: ctx.path.clone(),
            app_error_code: kind.code().to_owned(),
            exception_id: Uuid::new_v4(),
            correlation_id: None,
            params: redact_params(&ctx.params),
            errors,
        }
    }

    /// Envelope for a typed failure. Validation details come before the
    /// chain of the failure's sources.
    pub fn envelope_for(&self, failure: &Failure, ctx: &RequestContext) -> ErrorEnvelope {
        let mut envelope = self.build_envelope(failure.kind(), ctx, failure.args(), failure.source());

        if !failure.violations().is_empty() {
            let chain = std::mem::take(&mut envelope.errors);
            envelope.errors = failure
                .violations()
                .iter()
                .cloned()
                .map(ErrorDetail::Validation)
                .chain(chain)
                .collect();
        }
        if !failure.params().is_empty() {
            envelope.params = redact_params(failure.params());
        }
        envelope.correlation_id = failure.correlation_id().map(str::to_owned);
        envelope
    }

    /// Log `envelope` and offer it to the interceptors.
    pub fn publish(&self, envelope: &ErrorEnvelope, cause: &(dyn Error + 'static)) {
        match serde_json::to_string_pretty(envelope) {
            Ok(json) => error!("[envelope] {json}"),
            Err(e) => error!(
                "[envelope] {} {} (unserializable: {e})",
                envelope.exception_id, envelope.app_error_code
            ),
        }
        error!(
            "[envelope] exceptionId={} cause: {}",
            envelope.exception_id,
            describe_chain(cause, &self.catalog)
        );

        for interceptor in &self.interceptors {
            let outcome = catch_unwind(AssertUnwindSafe(|| interceptor.handle(envelope, cause)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    "[envelope] interceptor {} failed for {}: {e}",
                    interceptor.name(),
                    envelope.exception_id
                ),
                Err(_) => warn!(
                    "[envelope] interceptor {} panicked for {}",
                    interceptor.name(),
                    envelope.exception_id
                ),
            }
        }
    }

    /// Build the envelope for `failure`, publish it and return it.
    pub fn handle(&self, failure: &Failure, ctx: &RequestContext) -> ErrorEnvelope {
        let envelope = self.envelope_for(failure, ctx);
        self.publish(&envelope, failure);
        envelope
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
