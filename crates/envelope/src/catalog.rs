use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use thiserror::Error;

use crate::kind::ErrorKind;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read error-code file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed error-code file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable map from error kind to message template.
///
/// Starts from the built-in templates; a JSON file of `{"CODE": "template"}`
/// pairs can override any of them.
#[derive(Debug, Clone)]
pub struct ErrorCatalog {
    templates: HashMap<ErrorKind, String>,
}

impl Default for ErrorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ErrorCatalog {
    pub fn builtin() -> Self {
        let templates = ErrorKind::ALL
            .into_iter()
            .map(|k| (k, k.default_template().to_owned()))
            .collect();
        ErrorCatalog { templates }
    }

    /// Built-in templates with `overrides` applied. Codes that name no known
    /// kind are skipped.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut catalog = Self::builtin();
        for (code, template) in overrides {
            match ErrorKind::from_code(code.as_ref()) {
                Some(kind) => {
                    catalog.templates.insert(kind, template.into());
                }
                None => warn!("[catalog] ignoring unknown error code {:?}", code.as_ref()),
            }
        }
        catalog
    }

    /// Load overrides from `path`. The file must exist.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let overrides: BTreeMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "[catalog] loaded {} override(s) from {}",
            overrides.len(),
            path.display()
        );
        Ok(Self::with_overrides(overrides))
    }

    /// Like [`ErrorCatalog::load`], but a missing file yields the built-in
    /// catalog.
    pub fn load_or_builtin(path: &Path) -> Result<Self, CatalogError> {
        match Self::load(path) {
            Err(CatalogError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::builtin())
            }
            other => other,
        }
    }

    pub fn template(&self, kind: ErrorKind) -> &str {
        self.templates
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_template())
    }

    pub fn describe<S: AsRef<str>>(&self, kind: ErrorKind, args: &[S]) -> String {
        render(self.template(kind), args)
    }
}

/// Substitute `{N}` placeholders with `args[N]`. Placeholders without a
/// matching argument are left as written.
pub fn render<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let arg = after.find('}').and_then(|close| {
            after[..close]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .map(|a| (a.as_ref(), close))
        });

        match arg {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
