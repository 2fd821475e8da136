use std::collections::BTreeMap;

use anyhow::Result;
use fmeta_envelope::ErrorEnvelope;
use fmeta_fs::FileRecord;
use serde::{Deserialize, Serialize};

use crate::codec::to_json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Failures published since startup, by error code
    #[serde(default)]
    pub failures: BTreeMap<String, u64>,
}

/// Body returned for a request, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Record(FileRecord),
    Listing(Vec<FileRecord>),
    Health(HealthReport),
    Failure(ErrorEnvelope),
}

impl ApiResponse {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiResponse::Failure(envelope) => envelope.http_status_code,
            _ => 200,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ApiResponse::Failure(_))
    }

    pub fn to_json(&self, compact: bool) -> Result<Vec<u8>> {
        to_json(self, compact)
    }
}
