//! n-th prime lookup via the Wolfram|Alpha full results API
//!
//! FRAMEWORK PATTERN: Async Side Effects
//! - `Effect::FetchNthPrime` spawns a task that calls `PrimeLookup::nth_prime`
//! - The task reports back with `CounterAction::NthPrimeDidLoad`
//! - Failures are logged here and reach the reducer as `None`

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.wolframalpha.com/v2/query";

/// Something that can find the n-th prime.
///
/// Implementations swallow their own failures: the caller only learns
/// whether a prime came back.
pub trait PrimeLookup {
    fn nth_prime(&self, n: u64) -> impl Future<Output = Option<u64>> + Send;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no primary result in response")]
    NoPrimaryResult,

    #[error("primary result {0:?} is not a number")]
    NotANumber(String),
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Deserialize)]
struct QueryResponse {
    queryresult: QueryResult,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    pods: Vec<Pod>,
}

#[derive(Debug, Deserialize)]
struct Pod {
    #[serde(default)]
    primary: bool,
    #[serde(default)]
    subpods: Vec<SubPod>,
}

#[derive(Debug, Deserialize)]
struct SubPod {
    #[serde(default)]
    plaintext: String,
}

/// Pull the integer out of a query response body.
///
/// The answer is the first subpod of the first pod flagged `primary`.
pub fn parse_primary_result(body: &str) -> Result<u64, LookupError> {
    let response: QueryResponse = serde_json::from_str(body)?;
    let plaintext = response
        .queryresult
        .pods
        .into_iter()
        .find(|pod| pod.primary)
        .and_then(|pod| pod.subpods.into_iter().next())
        .map(|subpod| subpod.plaintext)
        .ok_or(LookupError::NoPrimaryResult)?;

    let trimmed = plaintext.trim();
    trimmed
        .parse()
        .map_err(|_| LookupError::NotANumber(trimmed.to_string()))
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone, Debug)]
pub struct WolframAlpha {
    client: Client,
    app_id: String,
    endpoint: String,
}

impl WolframAlpha {
    pub fn new(
        app_id: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            app_id: app_id.into(),
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask for the n-th prime, keeping the failure
    pub async fn query_nth_prime(&self, n: u64) -> Result<u64, LookupError> {
        let url = format!(
            "{}?input={}&format=plaintext&output=JSON&appid={}",
            self.endpoint,
            urlencoding::encode(&format!("prime {}", n)),
            urlencoding::encode(&self.app_id),
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        parse_primary_result(&body)
    }
}

impl PrimeLookup for WolframAlpha {
    async fn nth_prime(&self, n: u64) -> Option<u64> {
        match self.query_nth_prime(n).await {
            Ok(prime) => {
                tracing::info!(n, prime, "nth prime lookup finished");
                Some(prime)
            }
            Err(e) => {
                tracing::warn!(n, error = %e, "nth prime lookup failed");
                None
            }
        }
    }
}
