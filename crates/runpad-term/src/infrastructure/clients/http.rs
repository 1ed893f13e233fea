use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use runpad_protocol::RunRequest;
use runpad_protocol::RunResponse;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::RunJob;
use crate::domain::models::RunnerClient;
use crate::domain::models::RunnerName;

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

const HEALTH_CHECK_TIMEOUT_MS: u64 = 1000;
const FALLBACK_TIMEOUT_MS: u64 = 30_000;
const NO_OUTPUT_MESSAGE: &str = "No output";

pub struct HttpRunner {
    url: String,
    timeout: String,
}

impl Default for HttpRunner {
    fn default() -> HttpRunner {
        return HttpRunner {
            url: Config::get(ConfigKey::RunnerUrl),
            timeout: Config::get(ConfigKey::RunnerTimeout),
        };
    }
}

#[cfg(test)]
impl HttpRunner {
    fn with_url(url: &str) -> HttpRunner {
        return HttpRunner {
            url: url.to_string(),
            timeout: "5000".to_string(),
        };
    }
}

#[async_trait]
impl RunnerClient for HttpRunner {
    fn name(&self) -> RunnerName {
        RunnerName::Http
    }

    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("runner URL is not defined");
        }

        let health_url = format!("{}/health", self.url);
        let res = reqwest::Client::new()
            .get(&health_url)
            .timeout(Duration::from_millis(HEALTH_CHECK_TIMEOUT_MS))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "runner is not reachable");
            bail!("runner is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "runner health check failed");
            bail!("runner health check failed");
        }

        Ok(())
    }

    async fn run(&self, job: RunJob) -> Result<String> {
        let run_url = format!("{}/run", self.url);
        let payload = RunRequest::new(job.code, job.input);

        // Config::load validates the timeout; a bad value here must not be
        // reported to the user as a server problem.
        let timeout_ms = match self.timeout.parse::<u64>() {
            Ok(ms) => ms,
            Err(_) => {
                tracing::warn!(
                    timeout = self.timeout.as_str(),
                    "runner timeout is not a number of milliseconds, using the fallback"
                );
                FALLBACK_TIMEOUT_MS
            }
        };

        let response = reqwest::Client::new()
            .post(&run_url)
            .header("Content-Type", "application/json")
            .timeout(Duration::from_millis(timeout_ms))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "runner returned an error status");
            bail!("HTTP error! Status: {}", status.as_u16());
        }

        let body: RunResponse = response.json().await?;
        match body.output {
            Some(output) if !output.is_empty() => Ok(output),
            _ => Ok(NO_OUTPUT_MESSAGE.to_string()),
        }
    }
}
