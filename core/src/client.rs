// core/src/client.rs
use std::time::Duration;

use chrono::{DateTime, Utc};
use ureq::Agent;

use crate::error::{DragyError, Result};
use crate::payload::{decode_envelope, RunRecord};

pub const DEFAULT_BASE_URL: &str = "https://www.godragy.com";

/// Rå kjøring hentet fra API-et, med tidspunkt for hentingen.
#[derive(Debug, Clone)]
pub struct FetchedRun {
    pub record: RunRecord,
    pub fetched_at: DateTime<Utc>,
}

/// Dragy-klient – enkel blocking-versjon (ureq). Ingen automatiske retries.
pub struct DragyClient {
    agent: Agent,
    base_url: String,
}

impl DragyClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        // En enkel agent; ureq bruker rustls når "tls" er aktivert
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn run_url(&self, id: &str) -> String {
        format!("{}/dragy/u_user/get_CarResults?id={}", self.base_url, id)
    }

    pub fn fetch_run(&self, id: &str) -> Result<FetchedRun> {
        let url = self.run_url(id);
        log::debug!("fetching run {id} from {url}");

        let resp = match self.agent.get(&url).call() {
            Ok(r) => r,
            Err(ureq::Error::Status(code, r)) => {
                return Err(DragyError::Fetch(format!(
                    "Failed to fetch data: {} {}",
                    code,
                    r.status_text()
                )));
            }
            Err(e) => return Err(DragyError::Fetch(e.to_string())),
        };

        let body = resp
            .into_string()
            .map_err(|e| DragyError::Fetch(e.to_string()))?;
        let record = decode_envelope(&body)?;

        log::info!(
            "[Dragy] run {} => {} samples",
            id,
            record.samples().len()
        );

        Ok(FetchedRun { record, fetched_at: Utc::now() })
    }
}

impl Default for DragyClient {
    fn default() -> Self {
        Self::new()
    }
}
