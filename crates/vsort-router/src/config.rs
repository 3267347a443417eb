//! Router configuration.

use std::time::Duration;

use vsort_models::DEFAULT_CONFIDENCE_THRESHOLD;

/// Router configuration.
///
/// Loaded once at startup and injected into the handler; immutable for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Tag names that count as a positive match
    pub target_tags: Vec<String>,
    /// Minimum confidence (exclusive) for a tag to be eligible
    pub confidence_threshold: f64,
    /// Delay applied before processing each artifact (trigger-burst throttle)
    pub process_delay: Duration,
    /// Deadline for one classification call
    pub classify_timeout: Duration,
    /// Maximum artifacts processed concurrently
    pub max_concurrent: usize,
    /// How often the source prefix is polled for new artifacts
    pub poll_interval: Duration,
    /// Prefix of the source location inside the bucket
    pub source_prefix: String,
    /// Skip keys that already have an invocation in flight
    pub serialize_per_key: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            target_tags: vec!["person".to_string(), "human face".to_string()],
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            process_delay: Duration::from_millis(5000),
            classify_timeout: Duration::from_secs(30),
            max_concurrent: 2,
            poll_interval: Duration::from_secs(10),
            source_prefix: "incoming".to_string(),
            serialize_per_key: true,
        }
    }
}

impl RouterConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            target_tags: std::env::var("TARGET_TAGS")
                .map(|s| parse_target_tags(&s))
                .unwrap_or(defaults.target_tags),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            process_delay: Duration::from_millis(
                std::env::var("INTERVAL")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5000),
            ),
            classify_timeout: Duration::from_secs(
                std::env::var("CLASSIFY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            max_concurrent: std::env::var("ROUTER_MAX_CONCURRENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            poll_interval: Duration::from_secs(
                std::env::var("POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            source_prefix: std::env::var("SOURCE_PREFIX")
                .unwrap_or_else(|_| "incoming".to_string()),
            serialize_per_key: std::env::var("SERIALIZE_PER_KEY")
                .map(|s| !matches!(s.to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }
}

/// Parse a comma-separated target tag list, trimming whitespace and dropping
/// empty entries.
pub fn parse_target_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
