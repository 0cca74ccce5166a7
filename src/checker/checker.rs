// src/checker/checker.rs
use super::error::CheckError;
use super::result::CheckResult;
use crate::client::{ClientError, QueryClient, RestClient};
use crate::config::{ProbeConfig, Settings};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Single-shot probe: settings present, client builds, one query answers.
pub struct ConnectivityChecker {
    settings: Settings,
}

impl ConnectivityChecker {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run the probe against the Supabase REST endpoint.
    pub async fn check(&self) -> CheckResult {
        let timeout = self.settings.timeout();
        self.check_with(|config| {
            RestClient::new(&config.endpoint_url, &config.access_key, timeout)
        })
        .await
    }

    /// Run the probe with a caller-supplied client constructor.
    pub async fn check_with<C, F>(&self, connect: F) -> CheckResult
    where
        C: QueryClient,
        F: FnOnce(&ProbeConfig) -> Result<C, ClientError>,
    {
        let mut result = CheckResult::pending(&self.settings);

        let config = match self.settings.probe_config() {
            Ok(config) => config,
            Err(err) => {
                warn!("{}", err);
                return result.fail(err);
            }
        };
        result.config_present = true;
        debug!("Configuration present for {}", config.endpoint_url);

        let client = match connect(&config) {
            Ok(client) => client,
            Err(err) => {
                let err = CheckError::ClientConstruction(err);
                warn!("{}", err);
                return result.fail(err);
            }
        };
        info!("Supabase client created");

        let resource = self.settings.resource.as_str();
        let start = Instant::now();
        let outcome = client.count_rows(resource).await;
        result.elapsed_ms = Some(start.elapsed().as_millis() as u64);

        match outcome {
            Ok(data) => {
                info!(
                    resource,
                    elapsed_ms = result.elapsed_ms,
                    "Supabase connection successful"
                );
                result.succeed(data)
            }
            Err(err) => {
                let err = CheckError::from_query(err);
                warn!(resource, "{}", err);
                result.fail(err)
            }
        }
    }
}
