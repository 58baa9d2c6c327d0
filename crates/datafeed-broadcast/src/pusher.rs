//! Pusher Channels HTTP API client.
//!
//! Events are triggered with a signed `POST /apps/{app_id}/events`. The
//! signature is an HMAC-SHA256, keyed by the app secret, over
//!
//! ```text
//! POST\n{path}\n{query sorted by key, without auth_signature}
//! ```
//!
//! where the query carries `auth_key`, `auth_timestamp`, `auth_version`
//! and the MD5 of the request body. Any server speaking the same protocol
//! (e.g. a self-hosted Channels-compatible server) can be targeted by
//! overriding the host.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use tracing::debug;

use crate::error::BroadcastError;

type HmacSha256 = Hmac<Sha256>;

/// Protocol version sent as `auth_version`.
const AUTH_VERSION: &str = "1.0";

/// Largest `data` string Pusher accepts for a single event.
pub const MAX_EVENT_DATA_BYTES: usize = 10 * 1024;

/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Credentials and endpoint for a Pusher Channels app.
#[derive(Clone)]
pub struct PusherConfig {
    /// Numeric application id.
    pub app_id: String,
    /// Public app key, sent as `auth_key`.
    pub key: String,
    /// App secret used to sign requests. Never logged.
    pub secret: String,
    /// Cluster name (e.g. `eu`, `mt1`).
    pub cluster: String,
    /// Explicit API host (with optional port). Overrides the cluster host.
    pub host: Option<String>,
    /// Whether to use HTTPS.
    pub secure: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl PusherConfig {
    /// Create a configuration targeting the hosted cluster over HTTPS.
    pub fn new(app_id: &str, key: &str, secret: &str, cluster: &str) -> Self {
        Self {
            app_id: app_id.to_owned(),
            key: key.to_owned(),
            secret: secret.to_owned(),
            cluster: cluster.to_owned(),
            host: None,
            secure: true,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Target an explicit host instead of `api-{cluster}.pusher.com`.
    #[must_use]
    pub fn with_host(mut self, host: &str, secure: bool) -> Self {
        self.host = Some(host.to_owned());
        self.secure = secure;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API host requests are sent to.
    pub fn api_host(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| format!("api-{}.pusher.com", self.cluster))
    }

    fn events_url(&self, query: &str) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!(
            "{scheme}://{}{}?{query}",
            self.api_host(),
            self.events_path()
        )
    }

    fn events_path(&self) -> String {
        format!("/apps/{}/events", self.app_id)
    }
}

impl fmt::Debug for PusherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PusherConfig")
            .field("app_id", &self.app_id)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("cluster", &self.cluster)
            .field("host", &self.host)
            .field("secure", &self.secure)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Body of a trigger request. Field order is part of the signed bytes.
#[derive(Serialize)]
struct TriggerBody<'a> {
    name: &'a str,
    channels: [&'a str; 1],
    data: &'a str,
}

/// Client for triggering events on a Pusher Channels app.
#[derive(Clone)]
pub struct PusherClient {
    http: reqwest::Client,
    config: PusherConfig,
}

impl PusherClient {
    /// Build a client. No request is made until the first trigger.
    ///
    /// # Errors
    ///
    /// Returns [`BroadcastError::Config`] if the HTTP client cannot be built.
    pub fn new(config: PusherConfig) -> Result<Self, BroadcastError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BroadcastError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Trigger `event` on `channel` with a pre-serialized JSON `data` string.
    ///
    /// # Errors
    ///
    /// Returns [`BroadcastError::PayloadTooLarge`] before dispatch if
    /// `data` exceeds [`MAX_EVENT_DATA_BYTES`], [`BroadcastError::Http`] if
    /// the request fails in transit, and [`BroadcastError::Rejected`] if
    /// the API answers with a non-success status.
    pub async fn trigger(&self, channel: &str, event: &str, data: &str) -> Result<(), BroadcastError> {
        if data.len() > MAX_EVENT_DATA_BYTES {
            return Err(BroadcastError::PayloadTooLarge {
                size: data.len(),
                limit: MAX_EVENT_DATA_BYTES,
            });
        }

        let body = serde_json::to_vec(&TriggerBody {
            name: event,
            channels: [channel],
            data,
        })?;
        let query = signed_query(
            &self.config,
            &self.config.events_path(),
            Utc::now().timestamp(),
            &body,
        )?;
        let url = self.config.events_url(&query);

        debug!(channel, event, host = self.config.api_host(), "triggering Pusher event");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| BroadcastError::Http(format!("Pusher request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(BroadcastError::Rejected {
                status: status.as_u16(),
                body: error_body,
            });
        }

        Ok(())
    }
}

impl fmt::Debug for PusherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PusherClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Build the full query string, `auth_signature` included.
fn signed_query(
    config: &PusherConfig,
    path: &str,
    timestamp: i64,
    body: &[u8],
) -> Result<String, BroadcastError> {
    // Keys are already in sorted order.
    let unsigned = format!(
        "auth_key={}&auth_timestamp={timestamp}&auth_version={AUTH_VERSION}&body_md5={}",
        config.key,
        body_md5(body)
    );
    let string_to_sign = format!("POST\n{path}\n{unsigned}");

    let mut mac = HmacSha256::new_from_slice(config.secret.as_bytes())
        .map_err(|e| BroadcastError::Config(format!("invalid Pusher secret: {e}")))?;
    mac.update(string_to_sign.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(format!("{unsigned}&auth_signature={signature}"))
}

fn body_md5(body: &[u8]) -> String {
    use md5::{Digest, Md5};
    hex::encode(Md5::digest(body))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn docs_config() -> PusherConfig {
        PusherConfig::new("3", "278d425bdf160c739803", "7ad3773142a6692b25b8", "mt1")
    }

    fn docs_body() -> Vec<u8> {
        serde_json::to_vec(&TriggerBody {
            name: "foo",
            channels: ["project-3"],
            data: r#"{"some":"data"}"#,
        })
        .unwrap()
    }

    #[test]
    fn trigger_body_field_order() {
        let body = String::from_utf8(docs_body()).unwrap();
        assert_eq!(
            body,
            r#"{"name":"foo","channels":["project-3"],"data":"{\"some\":\"data\"}"}"#
        );
    }

    #[test]
    fn body_md5_matches_reference() {
        assert_eq!(body_md5(&docs_body()), "ec365a775a4cd0599faeb73354201b6f");
    }

    #[test]
    fn signature_matches_reference() {
        let config = docs_config();
        let query = signed_query(&config, "/apps/3/events", 1_353_088_179, &docs_body()).unwrap();
        assert_eq!(
            query,
            "auth_key=278d425bdf160c739803&auth_timestamp=1353088179&auth_version=1.0\
             &body_md5=ec365a775a4cd0599faeb73354201b6f\
             &auth_signature=da454824c97ba181a32ccc17a72625ba02771f50b50e1e7430e47a1f3f457e6c"
        );
    }

    #[test]
    fn cluster_host_by_default() {
        let config = docs_config();
        assert_eq!(config.api_host(), "api-mt1.pusher.com");
        assert!(config.events_url("a=b").starts_with("https://api-mt1.pusher.com/apps/3/events?"));
    }

    #[test]
    fn host_override() {
        let config = docs_config().with_host("127.0.0.1:6001", false);
        assert_eq!(config.events_url("a=b"), "http://127.0.0.1:6001/apps/3/events?a=b");
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", docs_config());
        assert!(!rendered.contains("7ad3773142a6692b25b8"));
        assert!(rendered.contains("278d425bdf160c739803"));
    }

    #[tokio::test]
    async fn oversized_payload_is_rejected_before_dispatch() {
        // Unroutable host: reaching the network would fail differently.
        let client = PusherClient::new(docs_config().with_host("127.0.0.1:1", false)).unwrap();
        let data = "x".repeat(MAX_EVENT_DATA_BYTES.saturating_add(1));

        let result = client.trigger("analytics-channel", "new-data", &data).await;
        assert!(matches!(
            result,
            Err(BroadcastError::PayloadTooLarge { limit: MAX_EVENT_DATA_BYTES, .. })
        ));
    }
}
