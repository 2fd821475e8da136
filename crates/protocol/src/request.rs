use std::path::PathBuf;

use fmeta_envelope::{Failure, Params, RequestContext, ValidationDetail};

use crate::{
    DEFAULT_LIST_DEPTH, DEPTH_PARAM, PATH_PARAM, REQUEST_OBJECT, codec::split_target,
};

/// Endpoints served under the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    File,
    Directory,
    List,
    Health,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::File, Route::Directory, Route::List, Route::Health];

    pub const fn path(self) -> &'static str {
        match self {
            Route::File => "/filemetadata/file",
            Route::Directory => "/filemetadata/directory",
            Route::List => "/filemetadata/list",
            Route::Health => "/healthz",
        }
    }

    /// Exact match, ignoring one trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

/// A request that passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    GetFileMetadata { path: PathBuf },
    GetDirectoryMetadata { path: PathBuf },
    ListFiles { path: PathBuf, depth: usize },
    Health,
}

/// Failure context for a raw request target.
pub fn context_for(target: &str) -> RequestContext {
    let (path, params) = split_target(target);
    RequestContext::new(path, params)
}

impl ApiRequest {
    /// Validate `method` and the parameters already split into `ctx`.
    ///
    /// Checks run in order: route, method, missing `path`, then every other
    /// parameter rule at once.
    pub fn parse(method: &str, ctx: &RequestContext) -> Result<ApiRequest, Failure> {
        let route =
            Route::from_path(&ctx.path).ok_or_else(|| Failure::resource_not_found(&ctx.path))?;

        if !method.eq_ignore_ascii_case("GET") {
            return Err(Failure::method_not_allowed(method, &["GET"]));
        }

        if route == Route::Health {
            return Ok(ApiRequest::Health);
        }

        let path = required_path(&ctx.params)?;
        let mut violations = path_violations(&ctx.params);

        let depth = match route {
            Route::List => match depth_param(&ctx.params) {
                Ok(depth) => depth,
                Err(v) => {
                    violations.push(v);
                    DEFAULT_LIST_DEPTH
                }
            },
            _ => DEFAULT_LIST_DEPTH,
        };

        if !violations.is_empty() {
            return Err(Failure::validation(REQUEST_OBJECT, violations));
        }

        let path = PathBuf::from(path);
        Ok(match route {
            Route::File => ApiRequest::GetFileMetadata { path },
            Route::Directory => ApiRequest::GetDirectoryMetadata { path },
            Route::List => ApiRequest::ListFiles { path, depth },
            Route::Health => ApiRequest::Health,
        })
    }
}

fn required_path(params: &Params) -> Result<&str, Failure> {
    params
        .get(PATH_PARAM)
        .and_then(|values| values.iter().find(|v| !v.is_empty()))
        .map(String::as_str)
        .ok_or_else(|| Failure::missing_parameter(PATH_PARAM))
}

fn path_violations(params: &Params) -> Vec<ValidationDetail> {
    let Some(values) = params.get(PATH_PARAM) else {
        return Vec::new();
    };

    let mut violations = Vec::new();
    if values.len() > 1 {
        violations.push(ValidationDetail::field(
            REQUEST_OBJECT,
            PATH_PARAM,
            values.clone(),
            "must be given exactly once",
        ));
    }
    for value in values.iter().filter(|v| v.contains('\0')) {
        violations.push(ValidationDetail::field(
            REQUEST_OBJECT,
            PATH_PARAM,
            value.as_str(),
            "must not contain a NUL byte",
        ));
    }
    violations
}

fn depth_param(params: &Params) -> Result<usize, ValidationDetail> {
    let Some(raw) = params.get(DEPTH_PARAM).and_then(|v| v.last()) else {
        return Ok(DEFAULT_LIST_DEPTH);
    };
    raw.trim().parse::<usize>().map_err(|_| {
        ValidationDetail::field(
            REQUEST_OBJECT,
            DEPTH_PARAM,
            raw.as_str(),
            "must be a non-negative integer",
        )
    })
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
