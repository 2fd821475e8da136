use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fmeta_runtime::{REDACTED_VALUE, is_sensitive_param};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request parameter name to every raw value it was given.
pub type Params = BTreeMap<String, Vec<String>>;

/// What the boundary knows about the request that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Request target, e.g. `/filemetadata/file`
    pub path: String,
    pub params: Params,
}

impl RequestContext {
    pub fn new(path: impl Into<String>, params: Params) -> Self {
        RequestContext {
            path: path.into(),
            params,
        }
    }
}

/// One field-level validation violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetail {
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<serde_json::Value>,
    pub message: String,
}

impl ValidationDetail {
    pub fn field(
        object: impl Into<String>,
        field: impl Into<String>,
        rejected_value: impl Into<serde_json::Value>,
        message: impl Into<String>,
    ) -> Self {
        ValidationDetail {
            object: object.into(),
            field: Some(field.into()),
            rejected_value: Some(rejected_value.into()),
            message: message.into(),
        }
    }

    /// A violation of the object as a whole.
    pub fn global(object: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationDetail {
            object: object.into(),
            field: None,
            rejected_value: None,
            message: message.into(),
        }
    }
}

/// One cause in a nested failure, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    // Tried first when deserializing: a chain link would also accept a
    // validation entry's `message`.
    Validation(ValidationDetail),
    Chain(ChainLink),
}

/// The structured failure response returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub application_name: String,
    pub http_status: String,
    pub http_status_code: u16,
    pub timestamp: DateTime<Utc>,
    pub error_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    pub path: String,
    pub app_error_code: String,
    pub exception_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
}

impl ErrorEnvelope {
    pub fn chain(&self) -> impl Iterator<Item = &ChainLink> {
        self.errors.iter().filter_map(|e| match e {
            ErrorDetail::Chain(link) => Some(link),
            ErrorDetail::Validation(_) => None,
        })
    }

    pub fn violations(&self) -> impl Iterator<Item = &ValidationDetail> {
        self.errors.iter().filter_map(|e| match e {
            ErrorDetail::Validation(v) => Some(v),
            ErrorDetail::Chain(_) => None,
        })
    }
}

/// Copy of `params` with the values of sensitive names masked.
pub fn redact_params(params: &Params) -> Params {
    params
        .iter()
        .map(|(name, values)| {
            let values = if is_sensitive_param(name) {
                vec![REDACTED_VALUE.to_owned(); values.len()]
            } else {
                values.clone()
            };
            (name.clone(), values)
        })
        .collect()
}
