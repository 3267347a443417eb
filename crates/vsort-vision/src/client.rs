//! Image-analysis client implementation.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use vsort_models::Tag;

use crate::error::{VisionError, VisionResult};

const API_VERSION: &str = "2023-10-01";
const ANALYZE_PATH: &str = "/computervision/imageanalysis:analyze";

/// Configuration for the vision client.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Service endpoint base URL
    pub endpoint: String,
    /// Subscription key credential
    pub key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl VisionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> VisionResult<Self> {
        Ok(Self {
            endpoint: std::env::var("VISION_ENDPOINT")
                .map_err(|_| VisionError::config_error("VISION_ENDPOINT not set"))?,
            key: std::env::var("VISION_KEY")
                .map_err(|_| VisionError::config_error("VISION_KEY not set"))?,
            timeout: Duration::from_secs(
                std::env::var("VISION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        })
    }
}

/// Client for the remote image-analysis service.
#[derive(Clone)]
pub struct VisionClient {
    endpoint: String,
    key: String,
    client: Client,
}

/// Analysis response wire format.
///
/// The read (text extraction) result is requested and parsed but not used by
/// the router.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(rename = "tagsResult")]
    tags_result: Option<TagsResult>,
    #[allow(dead_code)]
    #[serde(rename = "readResult")]
    read_result: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TagsResult {
    values: Vec<Tag>,
}

impl VisionClient {
    /// Create a new vision client from configuration.
    pub fn new(config: VisionConfig) -> VisionResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(VisionError::Http)?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            key: config.key,
            client,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> VisionResult<Self> {
        Self::new(VisionConfig::from_env()?)
    }

    /// Analyze an image and return the assigned tags.
    ///
    /// One outbound POST of the raw bytes per call; no retries at this layer.
    pub async fn analyze(&self, image: &[u8]) -> VisionResult<Vec<Tag>> {
        debug!("Analyzing {} image bytes", image.len());

        let url = format!(
            "{}{}?api-version={}&features=tags,read",
            self.endpoint, ANALYZE_PATH, API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VisionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: AnalyzeResponse =
            serde_json::from_str(&body).map_err(|e| VisionError::parse(e.to_string()))?;

        let tags = parsed
            .tags_result
            .map(|t| t.values)
            .unwrap_or_default();

        debug!("Analysis returned {} tags", tags.len());
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> VisionClient {
        VisionClient::new(VisionConfig {
            endpoint: server.uri(),
            key: "test-key".to_string(),
            timeout,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn parses_tags_from_analysis_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/computervision/imageanalysis:analyze"))
            .and(query_param("api-version", API_VERSION))
            .and(header("Ocp-Apim-Subscription-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tagsResult": {
                    "values": [
                        { "name": "person", "confidence": 0.82 },
                        { "name": "car", "confidence": 0.7 }
                    ]
                },
                "readResult": { "blocks": [] }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let tags = client.analyze(b"fake image bytes").await.unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0], Tag::new("person", 0.82));
    }

    #[tokio::test]
    async fn missing_tags_result_yields_empty_set() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let tags = client.analyze(b"bytes").await.unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid subscription key"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.analyze(b"bytes").await.unwrap_err();

        match err {
            VisionError::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("invalid subscription key"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.analyze(b"bytes").await.unwrap_err();
        assert!(matches!(err, VisionError::Parse(_)));
    }

    #[tokio::test]
    async fn slow_service_times_out_as_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_json(serde_json::json!({ "tagsResult": { "values": [] } })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(100));
        let err = client.analyze(b"bytes").await.unwrap_err();
        assert!(err.is_transport());
    }
}
