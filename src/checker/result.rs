// src/checker/result.rs
use super::error::{CheckError, FailureKind};
use crate::config::Settings;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Outcome of one probe. Built once per run and handed to the reporter.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub config_present: bool,
    /// `None` when no connection was attempted; left out of the JSON then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_ok: Option<bool>,
    pub error_detail: Option<String>,
    pub failure: Option<FailureKind>,
    pub missing: Vec<String>,
    pub endpoint_url: Option<String>,
    pub resource: String,
    pub data: Option<Value>,
    pub elapsed_ms: Option<u64>,
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    pub(crate) fn pending(settings: &Settings) -> Self {
        Self {
            config_present: false,
            connection_ok: None,
            error_detail: None,
            failure: None,
            missing: Vec::new(),
            endpoint_url: settings.endpoint_url.clone(),
            resource: settings.resource.clone(),
            data: None,
            elapsed_ms: None,
            checked_at: Utc::now(),
        }
    }

    pub(crate) fn fail(mut self, err: CheckError) -> Self {
        if let CheckError::MissingConfiguration { missing } = &err {
            self.missing = missing.clone();
        } else {
            self.connection_ok = Some(false);
        }
        self.failure = Some(err.kind());
        self.error_detail = Some(err.detail());
        self
    }

    pub(crate) fn succeed(mut self, data: Value) -> Self {
        self.connection_ok = Some(true);
        self.data = Some(data);
        self
    }

    pub fn is_success(&self) -> bool {
        self.connection_ok == Some(true)
    }

    /// Did the run get past client construction?
    pub fn client_created(&self) -> bool {
        self.config_present
            && !matches!(self.failure, Some(FailureKind::ClientConstruction))
    }
}
