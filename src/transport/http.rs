use std::time::Duration;
use tracing::info;
use ureq::Agent;

use crate::errors::SynonymError;

/// GET `url` and return the body as text.
///
/// A non-2xx status, a connection failure, or exceeding `timeout` is a
/// [`SynonymError::Fetch`]; there are no retries.
pub fn fetch_text(url: &str, timeout: Duration) -> Result<String, SynonymError> {
    info!("[biosynonyms] fetching remote table {url}");
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into();
    let response = agent.get(url).call().map_err(|err| SynonymError::Fetch {
        url: url.to_string(),
        reason: format!("request failed: {err}"),
    })?;
    response
        .into_body()
        .read_to_string()
        .map_err(|err| SynonymError::Fetch {
            url: url.to_string(),
            reason: format!("failed reading response body: {err}"),
        })
}
