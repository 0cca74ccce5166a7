// src/config/models.rs
use crate::checker::CheckError;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable carrying the service endpoint.
pub const URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
/// Environment variable carrying the anonymous access key.
pub const KEY_VAR: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";

pub const DEFAULT_RESOURCE: &str = "profiles";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Raw settings as loaded. The two required values stay optional here;
/// presence is decided by [`Settings::probe_config`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(rename = "url", default)]
    pub endpoint_url: Option<String>,

    #[serde(rename = "anon_key", default)]
    pub access_key: Option<String>,

    #[serde(default = "default_resource")]
    pub resource: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Endpoint and key, both known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub endpoint_url: String,
    pub access_key: String,
}

fn default_resource() -> String {
    DEFAULT_RESOURCE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            access_key: None,
            resource: default_resource(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn new(endpoint_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            access_key: Some(access_key.into()),
            ..Self::default()
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoint_present(&self) -> bool {
        non_empty(&self.endpoint_url).is_some()
    }

    pub fn key_present(&self) -> bool {
        non_empty(&self.access_key).is_some()
    }

    /// Names of the required variables that are absent or empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.endpoint_present() {
            missing.push(URL_VAR);
        }
        if !self.key_present() {
            missing.push(KEY_VAR);
        }
        missing
    }

    pub fn probe_config(&self) -> Result<ProbeConfig, CheckError> {
        match (non_empty(&self.endpoint_url), non_empty(&self.access_key)) {
            (Some(endpoint_url), Some(access_key)) => Ok(ProbeConfig {
                endpoint_url: endpoint_url.to_string(),
                access_key: access_key.to_string(),
            }),
            _ => Err(CheckError::MissingConfiguration {
                missing: self.missing().into_iter().map(String::from).collect(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        if self.resource.trim().is_empty() {
            return Err("resource must not be empty".to_string());
        }
        Ok(())
    }
}

// Blank but non-empty values count as present; the client rejects them.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
