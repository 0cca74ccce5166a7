// src/checker/error.rs
use crate::client::{ApiError, ClientError};
use serde::{Deserialize, Serialize};

/// Why a probe stopped.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Missing environment variables: {}", missing.join(", "))]
    MissingConfiguration { missing: Vec<String> },

    #[error("Supabase client error: {0}")]
    ClientConstruction(ClientError),

    #[error("Supabase connection failed: {0}")]
    Query(ApiError),

    #[error("Supabase connection failed: {0}")]
    Transport(ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingConfiguration,
    ClientConstruction,
    Query,
    Transport,
}

impl CheckError {
    /// Classify an error returned by the query call.
    pub fn from_query(err: ClientError) -> Self {
        match err {
            ClientError::Api(api) => CheckError::Query(api),
            err if err.is_transport() => CheckError::Transport(err),
            err => CheckError::ClientConstruction(err),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            CheckError::MissingConfiguration { .. } => FailureKind::MissingConfiguration,
            CheckError::ClientConstruction(_) => FailureKind::ClientConstruction,
            CheckError::Query(_) => FailureKind::Query,
            CheckError::Transport(_) => FailureKind::Transport,
        }
    }

    /// The underlying message, without the stage prefix.
    pub fn detail(&self) -> String {
        match self {
            CheckError::MissingConfiguration { .. } => self.to_string(),
            CheckError::ClientConstruction(err) | CheckError::Transport(err) => err.to_string(),
            CheckError::Query(api) => api.to_string(),
        }
    }
}
